use std::time::Duration;

use crossbeam::channel::bounded;
use lesson_course::concurrency::{
    generate, recv_with_timeout, run_worker_pool, run_worker_pool_report, spawn_cancellable,
    square, stage, try_send,
};
use proptest::prelude::*;

fn sorted(mut values: Vec<i64>) -> Vec<i64> {
    values.sort_unstable();
    values
}

#[test]
fn test_worker_pool_doubles_every_job() {
    let jobs: Vec<i64> = (1..=20).collect();
    let values = run_worker_pool(&jobs, 4, 5);
    assert_eq!(sorted(values), jobs.iter().map(|j| j * 2).collect::<Vec<_>>());
}

#[test]
fn test_worker_pool_with_zero_workers_and_rendezvous_queues() {
    let report = run_worker_pool_report(&[3, 1, 2], 0, 0);
    assert_eq!(sorted(report.values()), vec![2, 4, 6]);
    assert_eq!(report.per_worker().keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_extreme_jobs_wrap() {
    let values = run_worker_pool(&[i64::MAX, i64::MIN, -1], 2, 1);
    assert_eq!(sorted(values), vec![-2, -2, 0]);
}

#[test]
fn test_empty_job_list() {
    assert!(run_worker_pool(&[], 3, 2).is_empty());
}

#[test]
fn test_pipeline_preserves_order() {
    let out: Vec<i64> = square(generate(vec![1, 2, 3, 4])).iter().collect();
    assert_eq!(out, vec![1, 4, 9, 16]);

    let chained: Vec<i64> = stage(square(generate(vec![1, 2, 3])), |n| n + 1)
        .iter()
        .collect();
    assert_eq!(chained, vec![2, 5, 10]);
}

#[test]
fn test_pipeline_square_does_not_truncate_on_overflow() {
    let out: Vec<i64> = square(generate(vec![i64::MAX, 3, i64::MIN])).iter().collect();
    assert_eq!(out, vec![1, 9, 0]);
}

#[test]
fn test_cancellation_stops_worker() {
    let (data_tx, data_rx) = bounded(0);
    let (done_tx, done_rx) = bounded(0);
    let handle = spawn_cancellable(data_rx, done_rx);

    data_tx.send(7).unwrap();
    data_tx.send(8).unwrap();
    done_tx.send(()).unwrap();

    assert_eq!(handle.join().unwrap(), vec![7, 8]);
    assert!(data_tx.send(9).is_err());
}

#[test]
fn test_timeout_and_try_send() {
    let (tx, rx) = bounded(1);
    assert_eq!(recv_with_timeout(&rx, Duration::from_millis(20)), None);

    assert_eq!(try_send(&tx, "first"), Ok(()));
    assert_eq!(try_send(&tx, "second"), Err("second"));
    assert_eq!(recv_with_timeout(&rx, Duration::from_millis(20)), Some("first"));
}

proptest! {
    #[test]
    fn prop_pool_returns_each_job_doubled(
        jobs in prop::collection::vec(any::<i64>(), 0..40),
        workers in 0usize..6,
        capacity in 0usize..4,
    ) {
        let expected = sorted(jobs.iter().map(|j| j.wrapping_mul(2)).collect());
        prop_assert_eq!(sorted(run_worker_pool(&jobs, workers, capacity)), expected);
    }
}
