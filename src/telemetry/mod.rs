//! # Queue-depth telemetry.
//!
//! The pool reports two numeric gauges to an injected [`GaugeSink`] owned
//! by the surrounding application — there is no process-global metrics
//! state in this crate:
//! - [`WORK_QUEUE_LENGTH`]: current queued + running job units, sampled
//!   periodically;
//! - [`WORK_QUEUE_MAX`]: configured queue capacity, set once at pool
//!   construction.
//!
//! Both stop on pool teardown.

mod sampler;
mod sink;

#[cfg(feature = "logging")]
mod log;

pub(crate) use sampler::sample_queue_length;
pub use sink::{GaugeSink, NoopSink, WORK_QUEUE_LENGTH, WORK_QUEUE_MAX};

#[cfg(feature = "logging")]
pub use log::LogSink;
