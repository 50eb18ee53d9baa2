//==============================================================================
// Fan-out worker pool
//==============================================================================
//
// A producer pushes jobs into a bounded queue and closes it by dropping the
// sender. Every worker drains the same queue until it is closed, doubles each
// job (wrapping on overflow) and sends the result back. The caller knows how
// many jobs it submitted, so it stops after receiving exactly that many
// results.

use std::collections::BTreeMap;
use std::thread;

use crossbeam::channel::{bounded, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    pub worker: usize,
    pub job: i64,
    pub value: i64,
}

#[derive(Debug, Clone, Default)]
pub struct PoolReport {
    /// Results in arrival order.
    pub results: Vec<JobResult>,
}

impl PoolReport {
    pub fn values(&self) -> Vec<i64> {
        self.results.iter().map(|r| r.value).collect()
    }

    /// Number of jobs each worker handled, keyed by worker id.
    pub fn per_worker(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for result in &self.results {
            *counts.entry(result.worker).or_insert(0) += 1;
        }
        counts
    }
}

/// Consumes jobs until the queue is closed.
pub fn worker(id: usize, jobs: Receiver<i64>, results: Sender<JobResult>) {
    for job in jobs.iter() {
        tracing::trace!(worker = id, job, "processing job");
        let result = JobResult {
            worker: id,
            job,
            value: job.wrapping_mul(2),
        };
        if results.send(result).is_err() {
            break;
        }
    }
}

/// Runs `jobs` through `workers` threads sharing queues of `capacity` slots.
///
/// A worker count of zero is treated as one. A capacity of zero makes both
/// queues rendezvous channels.
pub fn run_worker_pool_report(jobs: &[i64], workers: usize, capacity: usize) -> PoolReport {
    let workers = workers.max(1);

    let results = thread::scope(|s| {
        let (job_tx, job_rx) = bounded::<i64>(capacity);
        let (result_tx, result_rx) = bounded::<JobResult>(capacity);

        for id in 1..=workers {
            let queue = job_rx.clone();
            let results = result_tx.clone();
            s.spawn(move || worker(id, queue, results));
        }
        drop(job_rx);
        drop(result_tx);

        // Producing on its own thread keeps small capacities from deadlocking
        // against the collector below.
        s.spawn(move || {
            for &job in jobs {
                if job_tx.send(job).is_err() {
                    break;
                }
            }
        });

        result_rx.iter().take(jobs.len()).collect::<Vec<_>>()
    });

    PoolReport { results }
}

pub fn run_worker_pool(jobs: &[i64], workers: usize, capacity: usize) -> Vec<i64> {
    run_worker_pool_report(jobs, workers, capacity).values()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut values: Vec<i64>) -> Vec<i64> {
        values.sort_unstable();
        values
    }

    #[test]
    fn test_doubles_every_job() {
        let values = run_worker_pool(&[1, 2, 3, 4, 5], 3, 10);
        assert_eq!(sorted(values), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_capacity_smaller_than_job_count() {
        let jobs: Vec<i64> = (1..=100).collect();
        let values = run_worker_pool(&jobs, 4, 1);
        assert_eq!(values.len(), 100);
        assert_eq!(sorted(values), jobs.iter().map(|j| j * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_rendezvous_queues() {
        let values = run_worker_pool(&[7, 8, 9], 2, 0);
        assert_eq!(sorted(values), vec![14, 16, 18]);
    }

    #[test]
    fn test_zero_workers_still_completes() {
        let values = run_worker_pool(&[1, 2], 0, 2);
        assert_eq!(sorted(values), vec![2, 4]);
    }

    #[test]
    fn test_no_jobs() {
        let report = run_worker_pool_report(&[], 3, 4);
        assert!(report.results.is_empty());
        assert!(report.per_worker().is_empty());
    }

    #[test]
    fn test_report_accounts_for_every_job() {
        let jobs: Vec<i64> = (0..50).collect();
        let report = run_worker_pool_report(&jobs, 5, 8);

        let total: usize = report.per_worker().values().sum();
        assert_eq!(total, 50);
        assert!(report.per_worker().keys().all(|id| (1..=5).contains(id)));
        for result in &report.results {
            assert_eq!(result.value, result.job * 2);
        }
    }

    #[test]
    fn test_worker_stops_when_queue_closes() {
        let (job_tx, job_rx) = bounded(3);
        let (result_tx, result_rx) = bounded(3);
        job_tx.send(1).unwrap();
        job_tx.send(2).unwrap();
        drop(job_tx);

        worker(9, job_rx, result_tx);

        let got: Vec<_> = result_rx.iter().collect();
        assert_eq!(
            got,
            vec![
                JobResult { worker: 9, job: 1, value: 2 },
                JobResult { worker: 9, job: 2, value: 4 },
            ]
        );
    }
}
