//! Trailing-edge debounce timer owned by the orchestrator.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the most recent value until it has been left alone for `delay`
///
/// Every [`Debouncer::schedule`] replaces the pending value and restarts the
/// timer, so only the trailing value of a burst is ever delivered.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the timer.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.delay, value));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the timer to expire and take the pending value.
    ///
    /// Never resolves while disarmed. Cancel-safe: dropping the future before
    /// it completes leaves the pending value in place.
    pub async fn fired(&mut self) -> T {
        match &self.pending {
            Some((deadline, _)) => tokio::time::sleep_until(*deadline).await,
            None => std::future::pending::<()>().await,
        }
        match self.pending.take() {
            Some((_, value)) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        debouncer.schedule(1);
        assert!(debouncer.is_armed());

        assert_eq!(debouncer.fired().await, 1);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert!(!debouncer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_restarts_timer_and_keeps_last_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        debouncer.schedule("a");
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule("b");

        assert_eq!(debouncer.fired().await, "b");
        assert_eq!(start.elapsed(), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule(7);
        assert_eq!(debouncer.cancel(), Some(7));
        assert!(!debouncer.is_armed());

        let result = tokio::time::timeout(Duration::from_secs(2), debouncer.fired()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_pending_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule(3);

        let early = tokio::time::timeout(Duration::from_millis(100), debouncer.fired()).await;
        assert!(early.is_err());
        assert!(debouncer.is_armed());

        assert_eq!(debouncer.fired().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_fires_immediately() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule(());
        let start = Instant::now();
        debouncer.fired().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
