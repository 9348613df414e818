//! Scoped periodic timers
//!
//! A [`ScopedTicker`] runs a callback on a tokio interval until it is
//! stopped or dropped. Owners hold tickers as fields, so tearing down the
//! owner stops every callback it registered.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Periodic callback bound to the lifetime of this value
#[derive(Debug)]
pub struct ScopedTicker {
    period: Duration,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ScopedTicker {
    /// Run `callback` every `period`, first after one full period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = child.cancelled() => break,
                    _ = interval.tick() => callback(),
                }
            }
        });
        tracing::debug!(?period, "Ticker started");
        Self {
            period,
            token,
            handle: Some(handle),
        }
    }

    #[inline]
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Stop the ticker and wait for its task to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ScopedTicker {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let ticker = ScopedTicker::spawn(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_running());
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_callbacks() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let ticker = ScopedTicker::spawn(Duration::from_millis(10), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(25)).await;
        drop(ticker);
        let after_drop = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
