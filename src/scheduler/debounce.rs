//! # DebounceScheduler: one cancellable deferred action per stream.
//!
//! Trailing-edge debounce. A burst of `schedule` calls closer together than the
//! interval produces exactly one execution: the **last** action, fired `interval`
//! after the **last** call. There is no leading edge and no max-wait cap.
//!
//! ## Timeline (interval = 300ms)
//! ```text
//! t=0    schedule(A) ──► pending A, fires at 300
//! t=100  schedule(B) ──► cancel A, pending B, fires at 400
//! t=250  schedule(C) ──► cancel B, pending C, fires at 550
//! t=550  C runs; slot empty
//! ```
//!
//! ## Rules
//! - At most **one** pending timer exists at any time; replacing cancels the old one
//!   before the new one is installed (under the same lock).
//! - A timer task only runs its action if, after waking, it is still the installed
//!   timer; a replaced timer that already woke up exits without running.
//! - `cancel_pending()` with nothing pending is a no-op.
//! - Dropping the scheduler cancels the pending timer (no callback after teardown).
//! - Once an action has started it runs to completion; cancellation only affects
//!   timers that have not fired yet.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::document::DocumentId;

/// The installed timer.
struct PendingTimer {
    id: u64,
    target: DocumentId,
    fire_at: Instant,
    token: CancellationToken,
}

/// Result of [`DebounceScheduler::schedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    /// Earliest instant the action may run.
    pub fire_at: Instant,
    /// Target of the timer this call cancelled, if any.
    pub replaced: Option<DocumentId>,
}

/// Owns at most one pending deferred action.
///
/// ### Rules
/// - `schedule` and `cancel_pending` are synchronous and never block on the action
/// - The timer runs on the ambient tokio runtime (`schedule` must be called within one)
pub struct DebounceScheduler {
    slot: Arc<Mutex<Option<PendingTimer>>>,
    next_id: AtomicU64,
}

impl DebounceScheduler {
    /// Creates a scheduler with nothing pending.
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
        }
    }

    /// Cancels any pending action, then arranges for `action` to run once, no sooner
    /// than `interval` from now, unless cancelled again before firing.
    ///
    /// `target` identifies what the action works on (for inspection and events).
    pub fn schedule<F>(&self, interval: Duration, target: DocumentId, action: F) -> Scheduled
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let fire_at = Instant::now() + interval;
        let token = CancellationToken::new();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let replaced = {
            let mut slot = lock(&self.slot);
            let previous = slot.replace(PendingTimer {
                id,
                target,
                fire_at,
                token: token.clone(),
            });
            previous.map(|prev| {
                prev.token.cancel();
                prev.target
            })
        };

        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = time::sleep_until(fire_at) => {}
            }
            {
                let mut slot = lock(&slot);
                if slot.as_ref().map(|t| t.id) != Some(id) {
                    return;
                }
                slot.take();
            }
            action.await;
        });

        Scheduled { fire_at, replaced }
    }

    /// Cancels the pending action with no replacement.
    ///
    /// Returns the cancelled timer's target; `None` (no-op) if nothing was pending.
    pub fn cancel_pending(&self) -> Option<DocumentId> {
        let timer = lock(&self.slot).take()?;
        timer.token.cancel();
        Some(timer.target)
    }

    /// True if an action is waiting to fire.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).is_some()
    }

    /// Target of the pending action, if any.
    pub fn pending_target(&self) -> Option<DocumentId> {
        lock(&self.slot).as_ref().map(|t| t.target.clone())
    }

    /// Fire time of the pending action, if any.
    pub fn pending_fire_at(&self) -> Option<Instant> {
        lock(&self.slot).as_ref().map(|t| t.fire_at)
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn lock(slot: &Mutex<Option<PendingTimer>>) -> MutexGuard<'_, Option<PendingTimer>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
