//! # Per-batch synchronization context and job units.
//!
//! Every call to [`Pool::run_batch`](crate::Pool::run_batch) creates one
//! [`BatchContext`] shared by all of the batch's [`JobUnit`]s:
//!
//! - a completion counter initialized to the batch size, decremented
//!   exactly once per unit;
//! - a single-slot result channel — first publish wins, later publishes
//!   are dropped;
//! - a last-write-wins error cell;
//! - a one-shot cancellation token telling not-yet-started units to skip.
//!
//! ## Completion accounting
//! Every terminal path of a unit decrements the counter itself — except a
//! unit that wins the result slot. That decrement is deferred to the
//! fan-in side, which credits one completion per result it receives. Both
//! the crediting and the cancellation broadcast then live on the consumer
//! side of the channel, so the consumer's count of already-credited
//! successes cannot race a producer-side decrement.
//!
//! Whichever decrement reaches zero fires the `done` notification, which
//! releases the fan-in wait. The counter reaches zero exactly once per
//! batch regardless of how many units succeeded, failed, or were skipped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use tokio::sync::{mpsc, Notify};
use tokio_util::sync::CancellationToken;

use crate::error::JobError;
use crate::jobs::JobRef;

/// Shared synchronization state for one batch submission.
///
/// Owned exclusively by one `run_batch` call and its units; never shared
/// across batches.
pub(crate) struct BatchContext {
    /// Units not yet accounted for. Reaches zero exactly once.
    remaining: AtomicUsize,
    /// Fired by the decrement that takes `remaining` to zero.
    done: Notify,
    /// Producer side of the single-slot result channel.
    results: mpsc::Sender<Bytes>,
    /// Most recently stored job error; not accumulated.
    last_error: Mutex<Option<JobError>>,
    /// One-shot batch-scoped cancellation broadcast.
    cancel: CancellationToken,
}

impl BatchContext {
    /// Creates a context for `batch_size` units and returns it together
    /// with the consumer side of the result channel.
    pub(crate) fn new(batch_size: usize) -> (Arc<Self>, mpsc::Receiver<Bytes>) {
        let (results, rx) = mpsc::channel(1);
        let ctx = Arc::new(Self {
            remaining: AtomicUsize::new(batch_size),
            done: Notify::new(),
            results,
            last_error: Mutex::new(None),
            cancel: CancellationToken::new(),
        });
        (ctx, rx)
    }

    /// Accounts for one finished unit; fires `done` on the last one.
    pub(crate) fn complete_one(&self) {
        let prev = self.remaining.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "batch completion counter underflow");
        if prev == 1 {
            // Single permit, single waiter: the notification is not lost
            // even if the fan-in is not parked here yet.
            self.done.notify_one();
        }
    }

    /// Completes when every unit of the batch has been accounted for.
    pub(crate) async fn all_done(&self) {
        self.done.notified().await;
    }

    /// Offers a result to the single slot. Returns `true` if this unit won
    /// the slot; the winner must *not* call [`complete_one`](Self::complete_one).
    pub(crate) fn publish(&self, bytes: Bytes) -> bool {
        self.results.try_send(bytes).is_ok()
    }

    /// Stores an error, replacing any previously stored one.
    pub(crate) fn store_error(&self, err: JobError) {
        let mut slot = self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(err);
    }

    /// Takes the stored error, if any.
    pub(crate) fn take_error(&self) -> Option<JobError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Broadcasts cancellation to units that have not started yet.
    /// Idempotent.
    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Non-blocking check of the cancellation signal.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// One payload bound to its batch's job function and context.
///
/// Immutable after creation; consumed by the worker that dequeues it.
pub(crate) struct JobUnit<P> {
    payload: P,
    job: JobRef<P>,
    ctx: Arc<BatchContext>,
}

impl<P: Send + 'static> JobUnit<P> {
    pub(crate) fn new(payload: P, job: JobRef<P>, ctx: Arc<BatchContext>) -> Self {
        Self { payload, job, ctx }
    }

    /// Runs the unit to its terminal state.
    ///
    /// Checks the batch cancellation signal once, immediately before
    /// running the job function; a unit that has started is never
    /// interrupted.
    pub(crate) async fn run(self) {
        if self.ctx.is_cancelled() {
            self.ctx.complete_one();
            return;
        }

        match self.job.run(self.payload).await {
            Ok(Some(bytes)) => {
                if self.ctx.publish(bytes) {
                    // Not accounting here: the fan-in side credits this
                    // unit when it receives the result, keeping the
                    // decrement and the cancellation broadcast on the
                    // consumer side of the channel.
                    return;
                }
                // Lost the slot race; drop the result, not an error.
                self.ctx.complete_one();
            }
            Ok(None) => self.ctx.complete_one(),
            Err(err) => {
                self.ctx.store_error(err);
                self.ctx.complete_one();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::jobs::JobFn;

    #[tokio::test]
    async fn test_cancelled_unit_skips_job_function() {
        let (ctx, _rx) = BatchContext::new(1);
        ctx.cancel();

        let executed = Arc::new(AtomicUsize::new(0));
        let seen = executed.clone();
        let job: JobRef<u32> = JobFn::arc(move |_n: u32| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok::<Option<Bytes>, JobError>(None)
            }
        });

        JobUnit::new(7, job, ctx.clone()).run().await;

        assert_eq!(executed.load(Ordering::SeqCst), 0, "job must not start");
        // The skip still accounted for the unit.
        tokio::time::timeout(Duration::from_secs(1), ctx.all_done())
            .await
            .expect("skipped unit must complete the batch");
    }

    #[tokio::test]
    async fn test_first_publish_wins_slot() {
        let (ctx, mut rx) = BatchContext::new(2);

        assert!(ctx.publish(Bytes::from_static(b"first")));
        assert!(!ctx.publish(Bytes::from_static(b"second")), "slot is full");

        assert_eq!(rx.recv().await.as_deref(), Some(&b"first"[..]));
        // Slot freed: a later success may publish again.
        assert!(ctx.publish(Bytes::from_static(b"third")));
    }

    #[tokio::test]
    async fn test_error_cell_is_last_write_wins() {
        let (ctx, _rx) = BatchContext::new(2);

        ctx.store_error(JobError::new("one"));
        ctx.store_error(JobError::new("two"));

        assert_eq!(ctx.take_error(), Some(JobError::new("two")));
        assert_eq!(ctx.take_error(), None);
    }

    #[tokio::test]
    async fn test_done_fires_only_at_zero() {
        let (ctx, _rx) = BatchContext::new(2);

        ctx.complete_one();
        let early = tokio::time::timeout(Duration::from_millis(20), ctx.all_done()).await;
        assert!(early.is_err(), "one unit still outstanding");

        ctx.complete_one();
        tokio::time::timeout(Duration::from_secs(1), ctx.all_done())
            .await
            .expect("last completion must release the waiter");
    }

    #[tokio::test]
    async fn test_winner_defers_its_decrement() {
        let (ctx, mut rx) = BatchContext::new(1);

        let job: JobRef<u32> =
            JobFn::arc(|_n: u32| async move { Ok(Some(Bytes::from_static(b"win"))) });
        JobUnit::new(1, job, ctx.clone()).run().await;

        // The unit published but did not account for itself.
        let early = tokio::time::timeout(Duration::from_millis(20), ctx.all_done()).await;
        assert!(early.is_err(), "winning unit must leave the credit pending");

        assert_eq!(rx.recv().await.as_deref(), Some(&b"win"[..]));
        ctx.complete_one();
        tokio::time::timeout(Duration::from_secs(1), ctx.all_done())
            .await
            .expect("consumer credit must complete the batch");
    }
}
