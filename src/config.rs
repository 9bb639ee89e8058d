//! # Pool configuration.
//!
//! [`PoolConfig`] holds the two knobs the pool recognizes: the number of
//! worker loops and the capacity of the shared work queue.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → concurrency disabled: admission rejects every
//!   non-empty batch, so no work is ever queued.

/// Static configuration for a [`Pool`](crate::Pool).
///
/// ## Field semantics
/// - `workers`: number of long-lived worker loops (fixed at construction)
/// - `queue_capacity`: bound on queued + running job units across all
///   batches sharing the pool
///
/// All fields are public for flexibility. Prefer the clamped accessor when
/// spawning loops to avoid sprinkling sentinel checks across the codebase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker loops started at construction.
    ///
    /// The set is fixed for the pool's lifetime; there is no dynamic
    /// scaling. Values below 1 are clamped to 1 when loops are spawned.
    pub workers: usize,

    /// Maximum number of job units that may be queued or running at once.
    ///
    /// Admission control rejects any batch that would push the in-flight
    /// count past this bound. `0` admits nothing (every non-empty batch is
    /// rejected with a capacity error).
    pub queue_capacity: usize,
}

impl PoolConfig {
    /// Returns the worker count clamped to a minimum of one loop.
    #[inline]
    pub fn workers_clamped(&self) -> usize {
        self.workers.max(1)
    }
}

impl Default for PoolConfig {
    /// Default configuration:
    ///
    /// - `workers = 30`
    /// - `queue_capacity = 10_000`
    fn default() -> Self {
        Self {
            workers: 30,
            queue_capacity: 10_000,
        }
    }
}
