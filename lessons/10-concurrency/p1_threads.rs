//! Lesson 10: Threads
//!
//! Run with: cargo run --bin lesson_10_threads

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use lesson_course::{banner, key_points, section};
use rand::Rng;
use rayon::prelude::*;

fn main() {
    banner("Threads");

    section("Spawning and joining");
    println!("logical CPUs: {}", num_cpus::get());
    let handles: Vec<_> = (1..=3)
        .map(|id| {
            thread::spawn(move || {
                let pause = rand::thread_rng().gen_range(5..50);
                thread::sleep(Duration::from_millis(pause));
                format!("worker {} finished after {}ms", id, pause)
            })
        })
        .collect();
    for handle in handles {
        match handle.join() {
            Ok(message) => println!("{}", message),
            Err(_) => println!("a worker panicked"),
        }
    }

    println!();
    section("Scoped threads borrow from the stack");
    let words = vec!["alpha", "beta", "gamma"];
    let mut lengths = vec![0; words.len()];
    thread::scope(|s| {
        for (word, slot) in words.iter().zip(lengths.iter_mut()) {
            s.spawn(move || *slot = word.len());
        }
    });
    println!("lengths: {:?}", lengths);

    println!();
    section("Sharing state with Arc<Mutex<T>>");
    let total = Arc::new(Mutex::new(0));
    let mut handles = Vec::new();
    for i in 1..=10 {
        let total = Arc::clone(&total);
        handles.push(thread::spawn(move || {
            let mut guard = total.lock().unwrap_or_else(|e| e.into_inner());
            *guard += i;
        }));
    }
    for h in handles {
        let _ = h.join();
    }
    println!("sum 1..=10 = {}", *total.lock().unwrap_or_else(|e| e.into_inner()));

    println!();
    section("Data parallelism with rayon");
    let squares: u64 = (1..=1_000u64).into_par_iter().map(|n| n * n).sum();
    println!("sum of squares 1..=1000 = {}", squares);

    key_points(&[
        "thread::spawn needs 'static data; move ownership into the closure",
        "thread::scope lets threads borrow locals safely",
        "Arc shares ownership across threads, Mutex serialises access",
        "rayon parallelises iterators without manual thread management",
    ]);
}
