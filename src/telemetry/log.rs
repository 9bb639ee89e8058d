//! # LogSink — simple gauge printer
//!
//! A minimal sink that prints incoming gauges to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [gauge] work_queue_max=10000
//! [gauge] work_queue_length=42
//! ```

use super::sink::GaugeSink;

/// Gauge writer sink.
#[derive(Default)]
pub struct LogSink;

impl LogSink {
    /// Construct a new [`LogSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GaugeSink for LogSink {
    fn set_gauge(&self, name: &str, value: f64) {
        println!("[gauge] {name}={value}");
    }
}
