// src/session/debounce.rs — Cancellable edit debouncer
//
// Rapid consecutive edits to the same field coalesce into a single ledger
// call carrying only the final values. The timer is cancelled and re-armed
// on every trigger, never fired on a fixed schedule.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

pub struct Debouncer {
    window: Duration,
    inflight: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            inflight: None,
        }
    }

    /// Arm (or re-arm) the timer. Any previously armed action is aborted;
    /// `action` runs only if no further trigger arrives within the window.
    pub fn trigger<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        let window = self.window;
        self.inflight = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action.await;
        }));
    }

    /// Drop any armed action without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_triggers_coalesce_to_final_value() {
        let fired = Arc::new(AtomicU32::new(0));
        let value = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::default();

        for amount in [100, 200, 300] {
            let fired = fired.clone();
            let value = value.clone();
            debouncer.trigger(async move {
                fired.fetch_add(1, Ordering::SeqCst);
                value.store(amount, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(600)).await;

        // One firing, with the last keystroke's value.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(value.load(Ordering::SeqCst), 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_after_fire_fires_again() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::default();

        let f = fired.clone();
        debouncer.trigger(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(600)).await;

        let f = fired.clone();
        debouncer.trigger(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_pending_action() {
        let fired = Arc::new(AtomicU32::new(0));
        let mut debouncer = Debouncer::default();

        let f = fired.clone();
        debouncer.trigger(async move {
            f.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
