//! Lesson 10: Select, timeouts and cancellation
//!
//! Run with: cargo run --bin lesson_10_select

use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, select, unbounded};
use lesson_course::concurrency::{recv_with_timeout, spawn_cancellable, try_send};
use lesson_course::{banner, key_points, section};
use tokio::sync::mpsc;
use tokio::time::{interval, sleep, timeout};

/// The async version: a ticker, a message channel and a deadline raced in
/// one `tokio::select!` loop.
async fn async_select() {
    let (tx, mut rx) = mpsc::channel::<&str>(4);
    tokio::spawn(async move {
        for msg in ["one", "two", "three"] {
            sleep(Duration::from_millis(25)).await;
            if tx.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut ticker = interval(Duration::from_millis(40));
    let deadline = sleep(Duration::from_millis(150));
    tokio::pin!(deadline);

    let mut ticks = 0;
    loop {
        tokio::select! {
            Some(msg) = rx.recv() => println!("message: {}", msg),
            _ = ticker.tick() => {
                ticks += 1;
                println!("tick {}", ticks);
            }
            _ = &mut deadline => {
                println!("deadline reached after {} ticks", ticks);
                break;
            }
        }
    }

    match timeout(Duration::from_millis(20), sleep(Duration::from_secs(1))).await {
        Ok(()) => println!("slow task finished"),
        Err(_) => println!("slow task timed out after 20ms"),
    }
}

fn main() {
    banner("Select");

    section("Waiting on two channels");
    let (fast_tx, fast_rx) = unbounded();
    let (slow_tx, slow_rx) = unbounded();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        let _ = fast_tx.send("fast");
    });
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        let _ = slow_tx.send("slow");
    });
    for _ in 0..2 {
        select! {
            recv(fast_rx) -> msg => println!("from fast: {:?}", msg),
            recv(slow_rx) -> msg => println!("from slow: {:?}", msg),
        }
    }

    println!();
    section("Timeouts");
    let (tx, rx) = bounded::<&str>(1);
    println!("1. nothing sent: {:?}", recv_with_timeout(&rx, Duration::from_millis(30)));
    let _ = tx.send("ready");
    println!("2. value ready: {:?}", recv_with_timeout(&rx, Duration::from_millis(30)));

    println!();
    section("Non-blocking send");
    let (tx, _rx) = bounded(1);
    println!("1. first try_send: {:?}", try_send(&tx, 1));
    println!("2. second try_send (full): {:?}", try_send(&tx, 2));

    println!();
    section("Cancellation");
    let (data_tx, data_rx) = bounded(0);
    let (done_tx, done_rx) = bounded(0);
    let worker = spawn_cancellable(data_rx, done_rx);
    for n in 1..=4 {
        let _ = data_tx.send(n);
    }
    let _ = done_tx.send(());
    match worker.join() {
        Ok(seen) => println!("worker processed {:?} before cancellation", seen),
        Err(_) => println!("worker panicked"),
    }

    println!();
    section("Async select with tokio");
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(async_select()),
        Err(err) => println!("could not start runtime: {}", err),
    }

    key_points(&[
        "select! waits on several channel operations at once",
        "default(timeout) bounds how long a select blocks",
        "try_send returns the value back instead of blocking",
        "A done channel tells long-running workers to stop",
        "tokio::select! does the same for futures: channels, tickers, deadlines",
    ]);
}
