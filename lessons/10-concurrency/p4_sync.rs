//! Lesson 10: Synchronisation primitives
//!
//! Run with: cargo run --bin lesson_10_sync

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use dashmap::DashMap;
use lesson_course::concurrency::primitives::{
    count_unlocked, count_with_mutex, load_or_store, ObjectPool, OnceInit, ReadyFlag,
};
use lesson_course::{banner, key_points, section};

static CONFIG: OnceInit<String> = OnceInit::new();

fn main() {
    banner("Synchronisation");

    section("Mutex vs unsynchronised counter");
    println!("1. with mutex: {}", count_with_mutex(100));
    println!("2. without lock: {} (may be below 100)", count_unlocked(100));

    println!();
    section("RwLock");
    let cache = Arc::new(RwLock::new(vec!["a".to_string()]));
    thread::scope(|s| {
        for i in 0..3 {
            let cache = Arc::clone(&cache);
            s.spawn(move || {
                let len = cache.read().map(|v| v.len()).unwrap_or(0);
                println!("reader {} sees {} item(s)", i, len);
            });
        }
    });
    if let Ok(mut items) = cache.write() {
        items.push("b".to_string());
    }
    println!("after write: {:?}", cache.read().map(|v| v.clone()).unwrap_or_default());

    println!();
    section("One-time initialisation");
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| CONFIG.get_or_init(|| "loaded once".to_string()));
        }
    });
    println!(
        "value {:?}, initialiser ran {} time(s)",
        CONFIG.get_or_init(String::new),
        CONFIG.runs()
    );

    println!();
    section("Waiting for a signal");
    let flag = Arc::new(ReadyFlag::new());
    let signaller = Arc::clone(&flag);
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        signaller.signal();
    });
    println!("signalled within 1s: {}", flag.wait_timeout(Duration::from_secs(1)));

    println!();
    section("Object pool");
    let pool = ObjectPool::new(|| Vec::<u8>::with_capacity(1024));
    let buf = pool.get();
    pool.put(buf);
    let _reused = pool.get();
    println!("buffers created: {}, idle: {}", pool.created(), pool.idle());

    println!();
    section("Concurrent map");
    let map = DashMap::new();
    println!("{:?}", load_or_store(&map, "region", "eu-west"));
    println!("{:?}", load_or_store(&map, "region", "us-east"));

    key_points(&[
        "Unsynchronised read-modify-write loses updates",
        "RwLock allows many readers or one writer",
        "OnceLock runs an initialiser exactly once",
        "Condvar lets threads sleep until a condition holds",
    ]);
}
