//! Lesson 35: Performance
//!
//! Run with: cargo run --release --bin lesson_35_performance
//! Bench with: cargo bench --bench performance

use std::time::{Duration, Instant};

use lesson_course::concurrency::primitives::ObjectPool;
use lesson_course::perf::{
    collect_growing, collect_preallocated, concat_naive, concat_with_capacity, par_count_primes,
    par_sum_of_squares, sum_of_squares,
};
use lesson_course::{banner, key_points, section};

fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

fn main() {
    banner("Performance Optimization");

    section("String building");
    let (_, naive) = time(|| concat_naive("a", 10_000));
    let (_, sized) = time(|| concat_with_capacity("a", 10_000));
    println!("1. repeated +:        {:?}", naive);
    println!("2. with_capacity:     {:?}", sized);

    println!();
    section("Vector preallocation");
    let (_, growing) = time(|| collect_growing(100_000));
    let (_, prealloc) = time(|| collect_preallocated(100_000));
    println!("1. growing push:      {:?}", growing);
    println!("2. with_capacity:     {:?}", prealloc);

    println!();
    section("Parallel iterators");
    let numbers: Vec<u64> = (1..=2_000_000).collect();
    let (seq, seq_time) = time(|| sum_of_squares(&numbers));
    let (par, par_time) = time(|| par_sum_of_squares(&numbers));
    println!("1. sequential: {} in {:?}", seq, seq_time);
    println!("2. rayon:      {} in {:?}", par, par_time);
    let (primes, primes_time) = time(|| par_count_primes(200_000));
    println!("3. primes below 200000: {} in {:?}", primes, primes_time);

    println!();
    section("Reusing allocations");
    let pool = ObjectPool::new(|| Vec::<u8>::with_capacity(4096));
    for _ in 0..1_000 {
        let mut buf = pool.get();
        buf.clear();
        buf.extend_from_slice(b"payload");
        pool.put(buf);
    }
    println!("1000 uses, {} buffer(s) allocated", pool.created());

    key_points(&[
        "Reserve capacity when the final size is known",
        "Measure release builds; debug timings mislead",
        "rayon pays off once the work per item outweighs the split overhead",
        "Profile and benchmark before and after each change",
    ]);
}
