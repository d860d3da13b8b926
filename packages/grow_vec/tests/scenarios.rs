//! End-to-end usage scenarios exercising the public API only.

use std::mem;

use grow_vec::{Error, GrowVec, SimpleVec, grow_vec, reserve};

#[test]
fn push_then_erase_in_the_middle() {
    let mut vec = GrowVec::with_len(0);

    for n in 1..=5 {
        vec.push_back(n);
    }

    assert_eq!(vec.len(), 5);
    assert!(vec.capacity() >= 5);
    assert_eq!(vec.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

    vec.erase(2);

    assert_eq!(vec, [1, 2, 4, 5]);
}

#[test]
fn moving_out_leaves_source_empty() {
    let mut a = grow_vec!["x".to_string(), "y".to_string(), "z".to_string()];

    let b = mem::take(&mut a);

    assert_eq!(a.len(), 0);
    assert_eq!(b, ["x".to_string(), "y".to_string(), "z".to_string()]);
}

#[test]
fn copy_is_independent_of_original() {
    let original = grow_vec![vec![1], vec![2, 3]];

    let mut copy = original.clone();
    copy[1].push(4);

    assert_eq!(original[1], [2, 3]);
    assert_eq!(copy[1], [2, 3, 4]);
}

#[test]
fn slice_methods_are_available() {
    let mut vec: GrowVec<i32> = (1..=6).rev().collect();

    vec.sort_unstable();

    assert_eq!(vec.first(), Some(&1));
    assert_eq!(vec.last(), Some(&6));
    assert!(vec.contains(&4));
    assert_eq!(vec.iter().sum::<i32>(), 21);
}

#[test]
fn builder_then_fallible_growth() {
    let mut vec = GrowVec::<u64>::builder().capacity(4).build();

    vec.extend([1, 2, 3, 4]);
    assert_eq!(vec.capacity(), 4);

    let error = vec.try_reserve(usize::MAX).unwrap_err();
    assert!(matches!(error, Error::CapacityOverflow { .. }));
    assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn simple_vec_checked_access() {
    let mut vec = SimpleVec::from(reserve(3));
    vec.push_back("a");
    vec.push_back("b");

    assert_eq!(vec.at(1).ok(), Some(&"b"));

    let error = vec.at(2).unwrap_err();
    assert!(error.to_string().contains("index 2"));
}

#[test]
fn simple_vec_reuses_slots_after_erase() {
    let mut vec = SimpleVec::from([1, 2, 3]);

    vec.erase(0);
    vec.push_back(9);

    assert_eq!(vec, [2, 3, 9]);
    assert_eq!(vec.capacity(), 3);
}
