//! # Pool: lifecycle, admission control, and fan-in.
//!
//! [`Pool`] owns the bounded work queue, the fixed set of worker loops,
//! the process-wide in-flight counter, and the teardown signal.
//!
//! ## Batch control flow
//! ```text
//! run_batch(payloads, job)
//!   ├─► teardown check            → Err(ShutDown)
//!   ├─► admission check           → Err(CapacityExceeded)
//!   ├─► try_send one unit each    → Err(EnqueueFailed) + cancel batch
//!   └─► fan-in select loop:
//!         ├─ result received  → record winner, credit producer, cancel batch
//!         ├─ all units done   → Ok(Some(winner)) | Err(Job) | Ok(None)
//!         └─ pool teardown    → Err(ShutDown)
//! ```
//!
//! Batches sharing a pool compete for the same workers and capacity; no
//! ordering is guaranteed between units of different batches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::jobs::JobRef;
use crate::pool::batch::{BatchContext, JobUnit};
use crate::pool::worker::worker_loop;
use crate::telemetry::{sample_queue_length, GaugeSink, NoopSink, WORK_QUEUE_MAX};

/// Bounded worker pool executing fan-out batches with first-success-wins
/// semantics.
///
/// ### Invariants
/// - The worker set is fixed at construction and never changes.
/// - The in-flight count (queued + running units, across all batches)
///   never exceeds the configured queue capacity.
/// - Every unit of an admitted batch is accounted for before
///   [`run_batch`](Pool::run_batch) returns.
pub struct Pool<P> {
    cfg: PoolConfig,
    /// Producer side of the shared work queue.
    tx: mpsc::Sender<JobUnit<P>>,
    /// Queued + running units across all batches sharing the pool.
    in_flight: Arc<AtomicUsize>,
    /// One-shot teardown broadcast for workers and the sampler.
    shutdown: CancellationToken,
}

impl<P: Send + 'static> Pool<P> {
    /// Creates a pool with a no-op telemetry sink.
    ///
    /// Must be called within a Tokio runtime: the worker loops and the
    /// queue-depth sampler are spawned here. The pool is ready when this
    /// returns; no work is queued before that.
    pub fn new(cfg: PoolConfig) -> Self {
        Self::with_telemetry(cfg, Arc::new(NoopSink))
    }

    /// Creates a pool reporting queue-depth gauges to the given sink.
    ///
    /// Publishes the configured capacity once as `work_queue_max`, then
    /// samples `work_queue_length` periodically until teardown.
    pub fn with_telemetry(cfg: PoolConfig, sink: Arc<dyn GaugeSink>) -> Self {
        // The channel itself needs a positive bound; with capacity 0 the
        // admission check rejects everything, so the slot goes unused.
        let (tx, rx) = mpsc::channel(cfg.queue_capacity.max(1));
        let queue = Arc::new(Mutex::new(rx));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let shutdown = CancellationToken::new();

        for _ in 0..cfg.workers_clamped() {
            tokio::spawn(worker_loop(
                Arc::clone(&queue),
                Arc::clone(&in_flight),
                shutdown.clone(),
            ));
        }

        sink.set_gauge(WORK_QUEUE_MAX, cfg.queue_capacity as f64);
        tokio::spawn(sample_queue_length(
            sink,
            Arc::clone(&in_flight),
            shutdown.clone(),
        ));

        Self {
            cfg,
            tx,
            in_flight,
            shutdown,
        }
    }

    /// Fans the payloads out over the shared job function and returns the
    /// first usable result.
    ///
    /// Returns:
    /// - `Ok(Some(bytes))` — a job produced a result; remaining queued
    ///   units of the batch are told to skip.
    /// - `Ok(None)` — every job completed without a result and without an
    ///   error (also the outcome for an empty batch).
    /// - `Err(PoolError::CapacityExceeded)` — the batch does not fit;
    ///   nothing was enqueued.
    /// - `Err(PoolError::EnqueueFailed)` — admission passed but a send
    ///   raced another batch; units already queued will self-skip.
    /// - `Err(PoolError::Job(_))` — no result; last error reported by any
    ///   job of the batch.
    /// - `Err(PoolError::ShutDown)` — the pool was torn down before or
    ///   while the batch was waiting.
    ///
    /// Never returns before every admitted unit has completed or been
    /// skipped.
    pub async fn run_batch(
        &self,
        payloads: Vec<P>,
        job: JobRef<P>,
    ) -> Result<Option<Bytes>, PoolError> {
        if self.shutdown.is_cancelled() {
            return Err(PoolError::ShutDown);
        }

        // Optimistic admission check; a concurrent batch may still beat us
        // to the queue slots, which the enqueue loop handles below.
        let requested = payloads.len();
        let capacity = self.cfg.queue_capacity;
        if self.in_flight.load(Ordering::Acquire) + requested > capacity {
            return Err(PoolError::CapacityExceeded {
                requested,
                capacity,
            });
        }
        if requested == 0 {
            return Ok(None);
        }

        let (ctx, mut results) = BatchContext::new(requested);
        for payload in payloads {
            let unit = JobUnit::new(payload, Arc::clone(&job), Arc::clone(&ctx));
            match self.tx.try_send(unit) {
                Ok(()) => {
                    self.in_flight.fetch_add(1, Ordering::AcqRel);
                }
                Err(_) => {
                    // Units that made it into the queue observe the
                    // cancelled batch and self-skip; their context is
                    // dropped with the last reference.
                    ctx.cancel();
                    return Err(PoolError::EnqueueFailed);
                }
            }
        }

        let mut winner: Option<Bytes> = None;
        loop {
            tokio::select! {
                Some(bytes) = results.recv() => {
                    // A later success replaces the pending value; each
                    // receipt credits exactly one producer that skipped
                    // its own decrement.
                    winner = Some(bytes);
                    ctx.complete_one();
                    ctx.cancel();
                }
                _ = ctx.all_done() => {
                    return match winner {
                        Some(bytes) => Ok(Some(bytes)),
                        None => match ctx.take_error() {
                            Some(err) => Err(PoolError::Job(err)),
                            None => Ok(None),
                        },
                    };
                }
                _ = self.shutdown.cancelled() => {
                    return Err(PoolError::ShutDown);
                }
            }
        }
    }

    /// Tears the pool down: worker loops and the telemetry sampler exit
    /// once they observe the signal. Irreversible and idempotent; any
    /// subsequent or concurrently waiting [`run_batch`](Pool::run_batch)
    /// call returns [`PoolError::ShutDown`].
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Current number of queued plus running job units across all batches.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl<P> Drop for Pool<P> {
    fn drop(&mut self) {
        // A dropped pool is torn down so the detached loops exit.
        self.shutdown.cancel();
    }
}
