//! # Gauge sink contract.

/// Gauge name for the current queued + running unit count.
pub const WORK_QUEUE_LENGTH: &str = "work_queue_length";

/// Gauge name for the configured queue capacity.
pub const WORK_QUEUE_MAX: &str = "work_queue_max";

/// # Destination for the pool's numeric gauges.
///
/// Implement this over whatever metrics system the application uses and
/// pass it to [`Pool::with_telemetry`](crate::Pool::with_telemetry).
/// Implementations must be cheap and non-blocking; they are called from
/// the sampler task and from pool construction.
///
/// # Example
/// ```
/// use fanpool::GaugeSink;
///
/// struct Stdout;
///
/// impl GaugeSink for Stdout {
///     fn set_gauge(&self, name: &str, value: f64) {
///         println!("{name}={value}");
///     }
/// }
/// ```
pub trait GaugeSink: Send + Sync + 'static {
    /// Sets the gauge `name` to `value`.
    fn set_gauge(&self, name: &str, value: f64);
}

/// Sink that drops every gauge. The default for [`Pool::new`](crate::Pool::new).
#[derive(Default)]
pub struct NoopSink;

impl GaugeSink for NoopSink {
    fn set_gauge(&self, _name: &str, _value: f64) {}
}
