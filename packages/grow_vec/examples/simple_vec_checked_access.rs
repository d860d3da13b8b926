//! Example of `SimpleVec` with a reserved capacity and checked element access.
//!
//! This example demonstrates creating a container from a capacity request, the difference
//! between checked access via `at()` and panicking indexing, and how erased slots are reused.

use grow_vec::{SimpleVec, reserve};

fn main() {
    let mut names: SimpleVec<String> = reserve(4).into();

    println!(
        "Created SimpleVec: len = {}, capacity = {}",
        names.len(),
        names.capacity()
    );

    names.push_back("Ada".to_string());
    names.push_back("Grace".to_string());
    names.insert(1, "Barbara".to_string());

    println!("Names: {names:?}");

    for index in [1, 5] {
        match names.at(index) {
            Ok(name) => println!("Position {index} holds {name}"),
            Err(e) => println!("Position {index} is not accessible: {e}"),
        }
    }

    names.erase(0);
    names.push_back("Edsger".to_string());

    println!(
        "After erase and push: {names:?} (capacity still {})",
        names.capacity()
    );
}
