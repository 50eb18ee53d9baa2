//! Lesson 10: Channels, worker pools and pipelines
//!
//! Run with: cargo run --bin lesson_10_channels

use std::thread;

use crossbeam::channel::{bounded, unbounded};
use lesson_course::concurrency::{generate, run_worker_pool_report, square, stage};
use lesson_course::{banner, key_points, section};

fn main() {
    banner("Channels");

    section("Unbounded channel");
    let (tx, rx) = unbounded();
    let producer = thread::spawn(move || {
        for i in 1..=3 {
            if tx.send(format!("message {}", i)).is_err() {
                break;
            }
        }
        // tx dropped here, closing the channel
    });
    for msg in rx.iter() {
        println!("received {}", msg);
    }
    let _ = producer.join();

    println!();
    section("Rendezvous channel");
    let (tx, rx) = bounded::<&str>(0);
    let sender = thread::spawn(move || {
        let _ = tx.send("handed over");
    });
    println!("{:?}", rx.recv());
    let _ = sender.join();

    println!();
    section("Worker pool");
    let jobs: Vec<i64> = (1..=9).collect();
    let report = run_worker_pool_report(&jobs, 3, 5);
    let mut values = report.values();
    values.sort_unstable();
    println!("results: {:?}", values);
    for (worker, count) in report.per_worker() {
        println!("worker {} handled {} job(s)", worker, count);
    }

    println!();
    section("Pipeline");
    let squared: Vec<i64> = square(generate(vec![1, 2, 3, 4, 5])).iter().collect();
    println!("generate -> square: {:?}", squared);
    let plus_one: Vec<i64> = stage(square(generate(vec![1, 2, 3])), |n| n + 1).iter().collect();
    println!("generate -> square -> +1: {:?}", plus_one);

    key_points(&[
        "Dropping every sender closes the channel and ends receiver loops",
        "bounded(0) is a rendezvous: send blocks until someone receives",
        "Many workers can share one receiver to split a job queue",
        "Pipelines chain stages, each owning its output sender",
    ]);
}
