//! # Closure-backed job (`JobFn`)
//!
//! [`JobFn`] wraps a closure `F: Fn(P) -> Fut`, producing a fresh future
//! per payload. This avoids shared mutable state; if the units of a batch
//! need common state, capture an `Arc<...>` explicitly in the closure.
//!
//! ## Example
//! ```rust
//! use fanpool::{Bytes, JobFn, JobRef};
//!
//! let job: JobRef<u32> = JobFn::arc(|shard: u32| async move {
//!     if shard % 2 == 0 {
//!         Ok(Some(Bytes::from_static(b"even")))
//!     } else {
//!         Ok(None)
//!     }
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::JobError;
use crate::jobs::job::Job;

/// Function-backed job implementation.
///
/// Wraps a closure that *creates* a new future per payload.
#[derive(Debug)]
pub struct JobFn<F> {
    f: F,
}

impl<F> JobFn<F> {
    /// Creates a new function-backed job.
    ///
    /// Prefer [`JobFn::arc`] when you immediately need a [`JobRef`](crate::JobRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the job and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<P, F, Fut> Job<P> for JobFn<F>
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<Option<Bytes>, JobError>> + Send + 'static,
{
    async fn run(&self, payload: P) -> Result<Option<Bytes>, JobError> {
        (self.f)(payload).await
    }
}
