// Select-based loops: a worker that runs until told to stop, and the
// timeout / non-blocking variants of a single channel operation.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{select, Receiver, Sender, TrySendError};

/// Spawns a worker that processes `data` until `done` fires.
///
/// The handle yields every value the worker saw, in order. The worker also
/// stops if either channel is disconnected.
pub fn spawn_cancellable(data: Receiver<i64>, done: Receiver<()>) -> JoinHandle<Vec<i64>> {
    thread::spawn(move || {
        let mut processed = Vec::new();
        loop {
            select! {
                recv(done) -> _ => {
                    tracing::debug!(count = processed.len(), "worker received cancellation");
                    break;
                }
                recv(data) -> msg => match msg {
                    Ok(n) => processed.push(n),
                    Err(_) => break,
                },
            }
        }
        processed
    })
}

/// Waits for a value but gives up after `timeout`.
pub fn recv_with_timeout<T>(rx: &Receiver<T>, timeout: Duration) -> Option<T> {
    select! {
        recv(rx) -> msg => msg.ok(),
        default(timeout) => None,
    }
}

/// Sends without blocking. Returns the value back if nobody could take it.
pub fn try_send<T>(tx: &Sender<T>, value: T) -> Result<(), T> {
    match tx.try_send(value) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(v)) | Err(TrySendError::Disconnected(v)) => Err(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::{bounded, unbounded};
    use std::time::Instant;

    #[test]
    fn test_worker_processes_until_done() {
        let (data_tx, data_rx) = bounded(0);
        let (done_tx, done_rx) = bounded(0);
        let handle = spawn_cancellable(data_rx, done_rx);

        for i in 1..=3 {
            data_tx.send(i).unwrap();
        }
        done_tx.send(()).unwrap();

        assert_eq!(handle.join().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_worker_stops_when_done_dropped() {
        let (_data_tx, data_rx) = bounded::<i64>(0);
        let (done_tx, done_rx) = bounded(0);
        let handle = spawn_cancellable(data_rx, done_rx);
        drop(done_tx);
        assert!(handle.join().unwrap().is_empty());
    }

    #[test]
    fn test_timeout_fires() {
        let (_tx, rx) = bounded::<&str>(0);
        let start = Instant::now();
        assert_eq!(recv_with_timeout(&rx, Duration::from_millis(50)), None);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_value_wins_race() {
        let (tx, rx) = unbounded();
        tx.send("completed").unwrap();
        assert_eq!(
            recv_with_timeout(&rx, Duration::from_secs(1)),
            Some("completed")
        );
    }

    #[test]
    fn test_try_send_respects_capacity() {
        let (tx, rx) = bounded(1);
        assert_eq!(try_send(&tx, "buffered"), Ok(()));
        assert_eq!(try_send(&tx, "overflow"), Err("overflow"));
        assert_eq!(rx.try_recv(), Ok("buffered"));
    }
}
