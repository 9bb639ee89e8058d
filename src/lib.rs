//! # fanpool
//!
//! **fanpool** is a bounded, fixed-size worker pool for fan-out/fan-in
//! workloads where the same computation is attempted against several
//! candidate inputs (storage backends, shards, replicas) and only the
//! first usable result matters.
//!
//! A batch of payloads shares one job function, one single-slot result
//! channel, one last-write-wins error cell, and one cancellation signal.
//! The call returns as soon as a success arrives, but never before every
//! unit in the batch has been accounted for — no leaked waiters, no
//! double-counted completions.
//!
//! ## Architecture
//! ```text
//!   run_batch(payloads, job)
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Admission: in_flight + batch size must fit the queue     │
//! └──────┬────────────────────────────────────────────────────┘
//!        │ try_send one JobUnit per payload
//!        ▼
//! ┌───────────────────┐      ┌──────────┐  ┌──────────┐
//! │   bounded queue   │─────►│ worker 1 │  │ worker N │   (fixed set,
//! └───────────────────┘      └────┬─────┘  └────┬─────┘    shared queue)
//!                                 │             │
//!                  skip if batch cancelled, else run job
//!                                 │             │
//!        ┌───────────────────┬────┴─────────────┘
//!        ▼                   ▼
//!  result slot (cap 1)   error cell (last write wins)
//!        │
//!        ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Fan-in: first result wins → cancel the rest of the batch │
//! │  return once the batch completion counter reaches zero    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Outcome semantics
//! - `Ok(Some(bytes))` — some job produced a usable result; the first one
//!   to win the single result slot is returned, later winners replace it,
//!   losers are dropped without being treated as errors.
//! - `Err(PoolError::Job(_))` — no job produced a result; the last error
//!   any job reported is surfaced.
//! - `Ok(None)` — no job produced a result and none reported an error.
//!
//! Cancellation is advisory and coarse: once a success is observed, units
//! of the same batch that have not started yet skip their job function.
//! A job already running is never interrupted.
//!
//! ## Example
//! ```rust
//! use fanpool::{Bytes, JobFn, JobRef, Pool, PoolConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = Pool::new(PoolConfig {
//!         workers: 4,
//!         queue_capacity: 64,
//!     });
//!
//!     // Probe three shards; only shard 2 holds the record.
//!     let job: JobRef<u32> = JobFn::arc(|shard: u32| async move {
//!         if shard == 2 {
//!             Ok(Some(Bytes::from_static(b"record")))
//!         } else {
//!             Ok(None)
//!         }
//!     });
//!
//!     let found = pool.run_batch(vec![1, 2, 3], job).await?;
//!     assert_eq!(found.as_deref(), Some(&b"record"[..]));
//!
//!     pool.shutdown();
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod jobs;
mod pool;
mod telemetry;

// ---- Public re-exports ----

pub use bytes::Bytes;

pub use config::PoolConfig;
pub use error::{JobError, PoolError};
pub use jobs::{Job, JobFn, JobRef};
pub use pool::Pool;
pub use telemetry::{GaugeSink, NoopSink, WORK_QUEUE_LENGTH, WORK_QUEUE_MAX};

// Optional: expose a simple println-based gauge sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use telemetry::LogSink;
