//! Calculator benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lesson_course::calculator::{add, factorial, multiply, sum};

fn bench_arithmetic(c: &mut Criterion) {
    c.bench_function("add", |b| b.iter(|| add(black_box(100), black_box(200))));
    c.bench_function("multiply", |b| b.iter(|| multiply(black_box(100), black_box(200))));
    c.bench_function("factorial_20", |b| b.iter(|| factorial(black_box(20))));
}

fn bench_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum");
    for size in [5usize, 100, 10_000] {
        let numbers: Vec<i64> = (0..size as i64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &numbers, |b, numbers| {
            b.iter(|| sum(black_box(numbers)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_arithmetic, bench_sum);
criterion_main!(benches);
