// Pipeline stages. Each stage owns the sending half of its output channel and
// drops it when the input runs dry, which is how the next stage learns that
// the stream has ended.

use std::thread;

use crossbeam::channel::{bounded, Receiver};

/// First stage: emits `nums` in order on a rendezvous channel.
pub fn generate(nums: Vec<i64>) -> Receiver<i64> {
    let (tx, rx) = bounded(0);
    thread::spawn(move || {
        for n in nums {
            if tx.send(n).is_err() {
                break;
            }
        }
    });
    rx
}

/// A middle stage applying `f` to every value it receives.
pub fn stage<F>(input: Receiver<i64>, f: F) -> Receiver<i64>
where
    F: Fn(i64) -> i64 + Send + 'static,
{
    let (tx, rx) = bounded(0);
    thread::spawn(move || {
        for n in input.iter() {
            if tx.send(f(n)).is_err() {
                break;
            }
        }
    });
    rx
}

/// Squares wrap on overflow, so the stage never dies mid-stream.
pub fn square(input: Receiver<i64>) -> Receiver<i64> {
    stage(input, |n| n.wrapping_mul(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_square() {
        let squares: Vec<i64> = square(generate(vec![2, 3, 4, 5])).iter().collect();
        assert_eq!(squares, vec![4, 9, 16, 25]);
    }

    #[test]
    fn test_empty_input_closes_output() {
        let out = square(generate(Vec::new()));
        assert!(out.recv().is_err());
    }

    #[test]
    fn test_stages_compose() {
        let out = stage(square(generate(vec![1, 2, 3])), |n| n + 1);
        assert_eq!(out.iter().collect::<Vec<_>>(), vec![2, 5, 10]);
    }

    #[test]
    fn test_dropping_consumer_stops_producer() {
        let out = square(generate((0..1_000).collect()));
        assert_eq!(out.recv(), Ok(0));
        drop(out);
        // Nothing to assert beyond not hanging: both stage threads see a
        // disconnected channel on their next send and exit.
    }
}
