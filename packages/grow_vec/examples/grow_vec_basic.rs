//! Basic usage example for `GrowVec`.
//!
//! This example demonstrates how the array grows as values are appended, how insertion and
//! erasure shift values around, and how capacity can be reserved up front.

use grow_vec::{GrowVec, grow_vec};

fn main() {
    let mut numbers = GrowVec::new();

    println!("Created empty GrowVec with capacity: {}", numbers.capacity());

    // Capacity doubles whenever an append finds the array full.
    for n in 1..=5 {
        numbers.push_back(n);
        println!(
            "Appended {n}: len = {}, capacity = {}",
            numbers.len(),
            numbers.capacity()
        );
    }

    numbers.insert(0, 0);
    println!("After inserting 0 at the front: {numbers:?}");

    numbers.erase(3);
    println!("After erasing position 3: {numbers:?}");

    // Explicit reservations are exact and never shrink the array.
    numbers.reserve(32);
    println!("Reserved room for 32 values: capacity = {}", numbers.capacity());

    // All slice methods are available through deref.
    numbers.reverse();
    println!("Reversed: {numbers:?}");

    let copy = numbers.clone();
    println!("Clone has exact capacity: {}", copy.capacity());

    let words = grow_vec!["alpha", "beta", "gamma"];
    let total_len: usize = words.into_iter().map(str::len).sum();
    println!("Total length of all words: {total_len}");
}
