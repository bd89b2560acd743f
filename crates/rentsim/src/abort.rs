//! Cooperative cancellation for in-flight market-data requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    aborted: AtomicBool,
    notify: Notify,
}

/// Shared abort flag for one request
///
/// Clones observe the same flag. Once aborted a signal stays aborted.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    inner: Arc<Inner>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the request as aborted and wake every task waiting on [`Self::aborted`].
    pub fn abort(&self) {
        if !self.inner.aborted.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Resolves once the signal is aborted.
    pub async fn aborted(&self) {
        loop {
            // Register before checking the flag so an abort in between is not missed
            let notified = self.inner.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}
