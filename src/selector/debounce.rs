//! Cancel-and-rearm debouncing on top of Tokio timers.
//!
//! Each call to [`Debouncer::schedule`] spawns a timer task guarded by a fresh
//! [`CancellationToken`] and cancels the token of the previous call. Only the
//! timer whose token survives the quiet period runs its action. Once an action
//! has started it runs to completion; cancellation only ever affects timers.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Quiet period applied to remote lookups.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Arm the timer to run `action` after the quiet period, replacing any pending timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending().replace(token.clone()) {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("debounced action superseded");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
            // Both branches can be ready on the same poll; a cancelled timer never fires.
            if token.is_cancelled() {
                return;
            }
            action.await;
        });
    }

    /// Clear any pending timer. Returns `true` if one was armed.
    ///
    /// An action that has already started is not interrupted.
    pub fn cancel(&self) -> bool {
        match self.pending().take() {
            Some(token) => {
                let was_armed = !token.is_cancelled();
                token.cancel();
                was_armed
            }
            None => false,
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
