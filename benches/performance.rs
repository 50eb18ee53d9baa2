//! Allocation and parallelism benchmarks for lesson 35.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lesson_course::perf::{
    collect_growing, collect_preallocated, concat_naive, concat_with_capacity, par_sum_of_squares,
    sum_of_squares,
};

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");
    group.bench_function("naive", |b| b.iter(|| concat_naive(black_box("a"), 10_000)));
    group.bench_function("with_capacity", |b| {
        b.iter(|| concat_with_capacity(black_box("a"), 10_000))
    });
    group.finish();
}

fn bench_vectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect");
    group.bench_function("growing", |b| b.iter(|| collect_growing(black_box(100_000))));
    group.bench_function("preallocated", |b| {
        b.iter(|| collect_preallocated(black_box(100_000)))
    });
    group.finish();
}

fn bench_sum_of_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_of_squares");
    for size in [1_000usize, 1_000_000] {
        let numbers: Vec<u64> = (0..size as u64).collect();
        group.bench_with_input(BenchmarkId::new("sequential", size), &numbers, |b, n| {
            b.iter(|| sum_of_squares(black_box(n)))
        });
        group.bench_with_input(BenchmarkId::new("rayon", size), &numbers, |b, n| {
            b.iter(|| par_sum_of_squares(black_box(n)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strings, bench_vectors, bench_sum_of_squares);
criterion_main!(benches);
