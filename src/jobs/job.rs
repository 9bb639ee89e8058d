//! # Job contract shared by every unit of a batch.
//!
//! A job maps one opaque payload to either a usable byte result, a
//! failure, or neither. The same job instance is shared by all units of a
//! batch, so implementations must be `Send + Sync` and keep any state
//! behind explicit synchronization.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::JobError;

/// Shared handle to a job, suitable for fanning out across a batch.
pub type JobRef<P> = Arc<dyn Job<P>>;

/// # One attempt of the batch's computation against a single payload.
///
/// Return value semantics:
/// - `Ok(Some(bytes))` — usable result; races other units for the batch's
///   single result slot, first one in wins.
/// - `Ok(None)` — no usable result and no error; the unit just completes.
/// - `Err(e)` — failure; stored last-write-wins and surfaced only if no
///   unit in the batch produces a result.
///
/// The pool never retries and never interrupts a running job; retries, if
/// desired, belong inside the job itself.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use fanpool::{Bytes, Job, JobError};
///
/// struct Lookup;
///
/// #[async_trait]
/// impl Job<u64> for Lookup {
///     async fn run(&self, key: u64) -> Result<Option<Bytes>, JobError> {
///         if key == 7 {
///             return Ok(Some(Bytes::from_static(b"found")));
///         }
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait Job<P: Send + 'static>: Send + Sync + 'static {
    /// Executes the job against one payload.
    async fn run(&self, payload: P) -> Result<Option<Bytes>, JobError>;
}
