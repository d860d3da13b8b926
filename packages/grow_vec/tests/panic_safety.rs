//! Verifies that operations interrupted by a panicking constructor leave containers intact,
//! without leaking values or dropping any value twice.
//!
//! Every test arms a construction failure in the probe ledger, runs the operation under
//! `catch_unwind` and then inspects both the container and the ledger.

use std::panic::{self, AssertUnwindSafe};

use grow_vec::{GrowVec, SimpleVec};
use testing::{Probe, ledger, probes, values};

/// Runs `f`, expecting it to panic with the injected probe failure.
fn expect_injected_panic<R>(f: impl FnOnce() -> R) {
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("operation was expected to panic but completed"),
        Err(payload) => payload,
    };

    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or_default();

    assert_eq!(message, ledger::INJECTED_PANIC_MESSAGE);
}

fn grow_vec_of(items: impl IntoIterator<Item = u32>) -> GrowVec<Probe> {
    probes(items).into_iter().collect()
}

#[test]
fn resize_panic_keeps_length_and_values() {
    ledger::reset();

    let mut vec = grow_vec_of([1, 2]);

    ledger::panic_after(1);
    expect_injected_panic(|| vec.resize(5));

    assert_eq!(vec.len(), 2);
    assert_eq!(values(&vec), [1, 2]);
    assert_eq!(ledger::live(), 2);
}

#[test]
fn clone_panic_leaves_source_and_leaks_nothing() {
    ledger::reset();

    let source = grow_vec_of(0..4);

    ledger::panic_after(2);
    expect_injected_panic(|| source.clone());

    assert_eq!(values(&source), [0, 1, 2, 3]);
    assert_eq!(ledger::live(), 4);
}

#[test]
fn from_elem_panic_leaks_nothing() {
    ledger::reset();

    let prototype = Probe::new(7);

    ledger::panic_after(2);
    expect_injected_panic(|| GrowVec::from_elem(5, &prototype));

    assert_eq!(ledger::live(), 1);
}

#[test]
fn with_len_panic_leaks_nothing() {
    ledger::reset();

    ledger::panic_after(3);
    expect_injected_panic(|| GrowVec::<Probe>::with_len(5));

    assert_eq!(ledger::live(), 0);
}

#[test]
fn emplace_back_panic_during_growth_keeps_array() {
    ledger::reset();

    let mut vec = grow_vec_of([1, 2]);
    assert_eq!(vec.capacity(), 2);
    let address = vec.as_ptr();

    ledger::panic_after(0);
    expect_injected_panic(|| {
        vec.emplace_back_with(|| Probe::new(3));
    });

    assert_eq!(values(&vec), [1, 2]);
    assert_eq!(vec.capacity(), 2);
    assert_eq!(vec.as_ptr(), address);
    assert_eq!(ledger::live(), 2);
}

#[test]
fn emplace_panic_during_growth_keeps_array() {
    ledger::reset();

    let mut vec = grow_vec_of([1, 2, 3]);
    let capacity = vec.capacity();

    ledger::panic_after(0);
    expect_injected_panic(|| {
        vec.emplace_with(1, || Probe::new(9));
    });

    assert_eq!(values(&vec), [1, 2, 3]);
    assert_eq!(vec.capacity(), capacity);
    assert_eq!(ledger::live(), 3);
}

#[test]
fn emplace_panic_within_capacity_keeps_array() {
    ledger::reset();

    let mut vec = grow_vec_of([1, 2, 3]);
    vec.reserve(10);

    ledger::panic_after(0);
    expect_injected_panic(|| {
        vec.emplace_with(0, || Probe::new(9));
    });

    assert_eq!(values(&vec), [1, 2, 3]);
    assert_eq!(ledger::live(), 3);

    // The array is still fully usable afterwards.
    vec.insert(0, Probe::new(0));
    assert_eq!(values(&vec), [0, 1, 2, 3]);
}

#[test]
fn clone_from_larger_source_panic_keeps_target() {
    ledger::reset();

    let mut target = grow_vec_of([1]);
    let source = grow_vec_of([4, 5, 6]);

    ledger::panic_after(1);
    expect_injected_panic(|| target.clone_from(&source));

    assert_eq!(values(&target), [1]);
    assert_eq!(values(&source), [4, 5, 6]);
    assert_eq!(ledger::live(), 4);
}

#[test]
fn collected_values_survive_a_failed_extension() {
    ledger::reset();

    let mut vec = grow_vec_of([1, 2]);

    ledger::panic_after(1);
    expect_injected_panic(|| vec.extend((10..13).map(Probe::new)));

    // Values appended before the failure stay; nothing is leaked.
    assert_eq!(values(&vec), [1, 2, 10]);
    assert_eq!(ledger::live(), 3);
}

#[test]
fn simple_vec_resize_panic_keeps_values() {
    ledger::reset();

    let mut vec: SimpleVec<Probe> = probes([1, 2]).into_iter().collect();

    ledger::panic_after(1);
    expect_injected_panic(|| vec.resize(5));

    assert_eq!(vec.len(), 2);
    assert_eq!(values(&vec), [1, 2]);
    assert!(vec.capacity() >= vec.len());
    assert_eq!(ledger::live(), 2);
}

#[test]
fn every_value_is_dropped_exactly_once() {
    ledger::reset();

    {
        let mut vec = GrowVec::new();

        for n in 0..20 {
            vec.push_back(Probe::new(n));
        }

        vec.insert(5, Probe::new(100));
        vec.erase(0);
        vec.pop_back();
        vec.resize(30);
        vec.truncate(10);

        let mut copy = vec.clone();
        copy.clone_from(&vec);

        let moved = vec;
        let consumed = moved.into_iter().take(3).count();
        assert_eq!(consumed, 3);
    }

    assert_eq!(ledger::live(), 0);
}
