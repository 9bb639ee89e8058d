//! # Periodic queue-depth sampler.
//!
//! One sampler task per pool: every [`QUEUE_REPORT_INTERVAL`] it reads the
//! shared in-flight counter and publishes it as
//! [`WORK_QUEUE_LENGTH`](super::WORK_QUEUE_LENGTH), until teardown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use super::sink::{GaugeSink, WORK_QUEUE_LENGTH};

/// How often the in-flight count is sampled.
pub(crate) const QUEUE_REPORT_INTERVAL: Duration = Duration::from_secs(15);

/// Runs until the teardown signal fires.
pub(crate) async fn sample_queue_length(
    sink: Arc<dyn GaugeSink>,
    in_flight: Arc<AtomicUsize>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = time::sleep(QUEUE_REPORT_INTERVAL) => {
                sink.set_gauge(WORK_QUEUE_LENGTH, in_flight.load(Ordering::Acquire) as f64);
            }
            _ = shutdown.cancelled() => return,
        }
    }
}
