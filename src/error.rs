//! Error types used by the pool and by job functions.
//!
//! This module defines two main error types:
//!
//! - [`PoolError`] — errors raised by admission, enqueueing, or teardown,
//!   plus the deferred job error surfaced when a whole batch fails.
//! - [`JobError`] — the opaque failure an individual job execution reports.
//!
//! [`PoolError`] provides `as_label()` for stable snake_case labels in
//! logs/metrics.

use thiserror::Error;

/// # Errors returned by [`Pool::run_batch`](crate::Pool::run_batch).
///
/// Capacity and enqueue errors are returned immediately, before any fan-in
/// wait. Job errors are captured last-write-wins across the batch and
/// surfaced only once every unit has completed without a usable result.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PoolError {
    /// Admission check failed: the batch does not fit the queue. Nothing
    /// was enqueued and the in-flight count is unchanged.
    #[error("queue doesn't have room for {requested} more jobs (capacity {capacity})")]
    CapacityExceeded {
        /// Size of the rejected batch.
        requested: usize,
        /// Configured queue capacity.
        capacity: usize,
    },

    /// A non-blocking send into the work queue could not be satisfied even
    /// though admission passed (raced with other concurrent batches). The
    /// batch was cancelled; units already queued will self-skip.
    #[error("failed to add a job to the work queue")]
    EnqueueFailed,

    /// The pool was shut down before or while the batch was waiting.
    #[error("pool is shut down")]
    ShutDown,

    /// No job in the batch produced a usable result; this is the last
    /// error any of them reported.
    #[error("job failed: {0}")]
    Job(#[from] JobError),
}

impl PoolError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fanpool::PoolError;
    ///
    /// let err = PoolError::EnqueueFailed;
    /// assert_eq!(err.as_label(), "pool_enqueue_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PoolError::CapacityExceeded { .. } => "pool_capacity_exceeded",
            PoolError::EnqueueFailed => "pool_enqueue_failed",
            PoolError::ShutDown => "pool_shut_down",
            PoolError::Job(_) => "job_failed",
        }
    }
}

/// # Failure reported by a single job execution.
///
/// Jobs are opaque to the pool, so their failures are carried as plain
/// messages. Within a batch only the most recently stored error survives;
/// errors are not accumulated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct JobError {
    message: String,
}

impl JobError {
    /// Creates a job error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the underlying message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
