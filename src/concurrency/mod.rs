//! Channel and lock patterns from the concurrency lesson.
//!
//! - `worker_pool` - fan-out over a shared bounded job queue
//! - `pipeline` - generate -> square stages joined by rendezvous channels
//! - `cancel` - select loops with a done signal and timeouts
//! - `primitives` - counters, one-shot init, condition gate, object pool

pub mod cancel;
pub mod pipeline;
pub mod primitives;
pub mod worker_pool;

pub use cancel::{recv_with_timeout, spawn_cancellable, try_send};
pub use pipeline::{generate, square, stage};
pub use worker_pool::{run_worker_pool, run_worker_pool_report, JobResult, PoolReport};
