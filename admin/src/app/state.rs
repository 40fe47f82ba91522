//! # Global Status
//!
//! Process-wide `loading` / `error` flags shown as a spinner and an error
//! banner. Every Gateway call holds an [`InFlight`] guard for its duration;
//! `loading` is `true` while at least one guard is alive, so overlapping
//! calls cannot race the flag back to idle.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Snapshot of the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Owner of the global flags. Share behind an `Arc`.
#[derive(Debug)]
pub struct GlobalState {
    status: watch::Sender<GlobalStatus>,
    in_flight: AtomicUsize,
    /// Bumped on every publish so a pending auto-dismiss only clears its own banner
    error_seq: AtomicU64,
    dismiss_after: Duration,
}

impl GlobalState {
    pub fn new(dismiss_after: Duration) -> Self {
        let (status, _) = watch::channel(GlobalStatus::default());
        Self {
            status,
            in_flight: AtomicUsize::new(0),
            error_seq: AtomicU64::new(0),
            dismiss_after,
        }
    }

    /// Read-only view of the flags.
    pub fn subscribe(&self) -> watch::Receiver<GlobalStatus> {
        self.status.subscribe()
    }

    pub fn snapshot(&self) -> GlobalStatus {
        self.status.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.status.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.status.borrow().error.clone()
    }

    /// Number of Gateway calls currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Mark a request as started: `loading = true`, banner cleared.
    ///
    /// The returned guard ends the request when dropped, on every exit path.
    pub fn begin_request(self: &Arc<Self>) -> InFlight {
        // Counter updates happen under the channel lock so they stay ordered
        // with the flag they drive.
        self.status.send_if_modified(|status| {
            self.in_flight.fetch_add(1, Ordering::AcqRel);
            let changed = !status.loading || status.error.is_some();
            status.loading = true;
            status.error = None;
            changed
        });
        InFlight {
            state: Arc::clone(self),
        }
    }

    fn end_request(&self) {
        self.status.send_if_modified(|status| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
            let loading = remaining > 0;
            let changed = status.loading != loading;
            status.loading = loading;
            changed
        });
    }

    /// Show `message` in the global banner.
    ///
    /// With `auto_dismiss`, the banner clears itself after the configured
    /// delay unless another message replaced it meanwhile. Auto-dismiss
    /// needs a Tokio runtime; without one the banner simply stays.
    pub fn publish_error(self: &Arc<Self>, message: impl Into<String>, auto_dismiss: bool) {
        let message = message.into();
        tracing::debug!(message = %message, auto_dismiss, "Publishing global error");
        // Sequence and banner change together under the channel lock
        let mut seq = 0;
        self.status.send_modify(|status| {
            seq = self.error_seq.fetch_add(1, Ordering::AcqRel) + 1;
            status.error = Some(message);
        });

        if !auto_dismiss {
            return;
        }
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let state = Arc::clone(self);
            let delay = self.dismiss_after;
            runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                state.dismiss_if_current(seq);
            });
        }
    }

    /// Clear the banner only if it is still the one published as `seq`.
    fn dismiss_if_current(&self, seq: u64) -> bool {
        self.status.send_if_modified(|status| {
            if self.error_seq.load(Ordering::Acquire) != seq {
                return false;
            }
            status.error.take().is_some()
        })
    }

    /// Clear the banner (explicit user dismissal).
    pub fn dismiss_error(&self) {
        self.status.send_if_modified(|status| status.error.take().is_some());
    }
}

/// Guard for one in-flight Gateway call.
#[derive(Debug)]
pub struct InFlight {
    state: Arc<GlobalState>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.state.end_request();
    }
}
