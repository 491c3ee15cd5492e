//! Delayed, cancellable task execution for debouncing.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Runs tasks after a delay, unless cancelled first.
pub trait DelayedExecutor: Send + Sync {
    fn execute_in(&self, delay: Duration, task: BoxFuture<'static, ()>);

    /// Cancel every task whose delay has not elapsed yet. Tasks already
    /// running are left to finish. Calling it twice is harmless.
    fn cancel_all(&self);
}

#[derive(Debug)]
struct Scheduled {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Executor backed by tokio tasks.
///
/// Cancellation only covers the delay: once the sleep is over the task runs
/// to completion.
#[derive(Debug, Default)]
pub struct TokioDelayedExecutor {
    pending: Mutex<Vec<Scheduled>>,
}

impl TokioDelayedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks scheduled and not yet finished
    pub fn pending_count(&self) -> usize {
        let mut pending = self.pending.lock();
        pending.retain(|scheduled| !scheduled.handle.is_finished());
        pending.len()
    }
}

impl DelayedExecutor for TokioDelayedExecutor {
    fn execute_in(&self, delay: Duration, task: BoxFuture<'static, ()>) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No tokio runtime, dropping delayed task");
            return;
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    log::trace!("Delayed task cancelled");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            task.await;
        });

        let mut pending = self.pending.lock();
        pending.retain(|scheduled| !scheduled.handle.is_finished());
        pending.push(Scheduled { token, handle });
    }

    fn cancel_all(&self) {
        for scheduled in self.pending.lock().drain(..) {
            scheduled.token.cancel();
        }
    }
}
