//! Basic benchmarks for the `grow_vec` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use grow_vec::{GrowVec, SimpleVec, reserve};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = u64;
const TEST_VALUE: TestItem = 1024;

const BATCH_SIZE: usize = 1_000;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("grow_vec_basic");

    let allocs_op = allocs.operation("push_back_grow");
    group.bench_function("push_back_grow", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut vec = GrowVec::new();

                for _ in 0..BATCH_SIZE {
                    vec.push_back(black_box(TEST_VALUE));
                }

                drop(black_box(vec));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("push_back_reserved");
    group.bench_function("push_back_reserved", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut vec = GrowVec::builder().capacity(BATCH_SIZE).build();

                for _ in 0..BATCH_SIZE {
                    vec.push_back(black_box(TEST_VALUE));
                }

                drop(black_box(vec));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_front");
    group.bench_function("insert_front", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(|| GrowVec::from_elem(BATCH_SIZE, &TEST_VALUE))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for vec in &mut arrays {
                vec.insert(0, black_box(TEST_VALUE));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("clone");
    group.bench_function("clone", |b| {
        b.iter_custom(|iters| {
            let source = GrowVec::from_elem(BATCH_SIZE, &TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(source.clone()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("simple_push_back_reserved");
    group.bench_function("simple_push_back_reserved", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut vec = SimpleVec::from(reserve(BATCH_SIZE));

                for _ in 0..BATCH_SIZE {
                    vec.push_back(black_box(TEST_VALUE));
                }

                drop(black_box(vec));
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
