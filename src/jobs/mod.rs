//! # Job abstractions.
//!
//! This module provides the job-related types:
//! - [`Job`] - trait for implementing an async job function
//! - [`JobFn`] - closure-backed job implementation
//! - [`JobRef`] - shared reference to a job (`Arc<dyn Job<P>>`)

mod job;
mod job_fn;

pub use job::{Job, JobRef};
pub use job_fn::JobFn;
