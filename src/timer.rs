use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

/// One-shot timer that reverts the status display to idle.
///
/// At most one timer is outstanding at a time: [`arm`] cancels any pending
/// timer before scheduling the replacement, as a single operation, so
/// overlapping timers are impossible by construction. When the delay
/// elapses, one notification is delivered on the receiver returned by
/// [`channel`]; the owner reacts to it on its own event loop and calls
/// [`clear`] to drop the spent handle.
///
/// [`arm`]: ResetTimer::arm
/// [`channel`]: ResetTimer::channel
/// [`clear`]: ResetTimer::clear
#[derive(Debug)]
pub struct ResetTimer {
    /// Where firings are delivered
    tx: mpsc::Sender<()>,
    /// The currently scheduled sleep task, if any
    pending: Option<JoinHandle<()>>,
}

impl ResetTimer {
    /// Creates a timer together with the receiver its firings are delivered
    /// on.
    pub fn channel() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx, pending: None }, rx)
    }

    /// Cancels any pending timer and schedules a new one that fires after
    /// `delay`.
    ///
    /// The deadline is fixed here, not when the timer task gets its first
    /// poll. A timer that already fired but has not been observed yet is
    /// not recalled: its notification stays queued and will still revert
    /// the display.
    pub fn arm(&mut self, delay: Duration) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let deadline = tokio::time::Instant::now() + delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(()).await;
        }));
    }

    /// Cancels any pending timer without scheduling a replacement.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Drops the handle of a timer that has fired.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Whether a timer is scheduled and has not completed yet.
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(4000);

    /// Lets spawned sleep tasks run, then counts queued firings.
    async fn firings(rx: &mut mpsc::Receiver<()>) -> usize {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let (mut timer, mut rx) = ResetTimer::channel();
        timer.arm(DELAY);
        assert!(timer.is_armed());

        tokio::time::advance(DELAY - Duration::from_millis(1)).await;
        assert_eq!(firings(&mut rx).await, 0);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(firings(&mut rx).await, 1);
        assert!(!timer.is_armed());

        tokio::time::advance(DELAY * 4).await;
        assert_eq!(firings(&mut rx).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_cancels_previous() {
        let (mut timer, mut rx) = ResetTimer::channel();
        timer.arm(DELAY);
        tokio::time::advance(DELAY / 2).await;

        // Re-arming must replace the first timer, not stack a second one.
        timer.arm(DELAY);
        tokio::time::advance(DELAY / 2).await;
        assert_eq!(firings(&mut rx).await, 0);

        tokio::time::advance(DELAY / 2).await;
        assert_eq!(firings(&mut rx).await, 1);

        tokio::time::advance(DELAY * 4).await;
        assert_eq!(firings(&mut rx).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let (mut timer, mut rx) = ResetTimer::channel();
        timer.arm(DELAY);
        timer.cancel();
        assert!(!timer.is_armed());

        tokio::time::advance(DELAY * 4).await;
        assert_eq!(firings(&mut rx).await, 0);
    }
}
