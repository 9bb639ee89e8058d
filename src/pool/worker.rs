//! # Worker loop.
//!
//! A fixed set of these loops is spawned at pool construction; each one
//! pulls job units from the shared bounded queue until teardown. The
//! receiver is shared behind an async mutex, so exactly one idle worker
//! holds it while waiting and releases it as soon as a unit is taken.
//!
//! State machine per loop:
//! - *waiting*: teardown observed → exit; queue closed → exit;
//!   unit dequeued → *executing*.
//! - *executing*: run the unit to its terminal state (success, skip, or
//!   error), decrement the in-flight count, back to *waiting*.
//!
//! There is no suspension point between dequeuing a unit and running it;
//! cancellation only prevents a unit from starting, never interrupts one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::pool::batch::JobUnit;

/// Work queue consumer handle shared by all loops of a pool.
pub(crate) type SharedQueue<P> = Arc<Mutex<mpsc::Receiver<JobUnit<P>>>>;

/// Runs one worker loop until teardown or queue close.
pub(crate) async fn worker_loop<P: Send + 'static>(
    queue: SharedQueue<P>,
    in_flight: Arc<AtomicUsize>,
    shutdown: CancellationToken,
) {
    loop {
        let unit = {
            let mut rx = queue.lock().await;
            tokio::select! {
                _ = shutdown.cancelled() => return,
                unit = rx.recv() => match unit {
                    Some(unit) => unit,
                    None => return,
                },
            }
            // Lock released here so a sibling can wait while we execute.
        };

        unit.run().await;
        in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
