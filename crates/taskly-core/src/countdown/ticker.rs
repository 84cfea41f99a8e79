//! Periodic countdown recomputation.
//!
//! A [`CountdownTicker`] lives as long as the countdown screen is active.
//! Starting it acquires a cancellation token; stopping it, or dropping the
//! handle, cancels the task.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::status::CountdownStatus;
use crate::clock::now_ms;

pub struct CountdownTicker {
    cancel: CancellationToken,
    anchor: watch::Sender<Option<i64>>,
    status: watch::Receiver<CountdownStatus>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Spawn the ticker on the current tokio runtime.
    ///
    /// `last_completed` anchors the target; `interval` is the fixed cadence
    /// and `period` the recompute cadence.
    pub fn start(last_completed: Option<i64>, interval: Duration, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let (anchor_tx, anchor_rx) = watch::channel(last_completed);
        let (status_tx, status_rx) =
            watch::channel(CountdownStatus::compute(last_completed, interval, now_ms()));

        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
            debug!(period_ms, "countdown ticker started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("countdown ticker stopped");
                        break;
                    }
                    _ = ticks.tick() => {
                        let anchor = *anchor_rx.borrow();
                        let status = CountdownStatus::compute(anchor, interval, now_ms());
                        status_tx.send_replace(status);
                    }
                }
            }
        });

        Self {
            cancel,
            anchor: anchor_tx,
            status: status_rx,
            handle: Some(handle),
        }
    }

    /// Move the anchor after a completion.
    pub fn set_last_completed(&self, last_completed: Option<i64>) {
        self.anchor.send_replace(last_completed);
    }

    /// Latest computed status.
    pub fn current(&self) -> CountdownStatus {
        *self.status.borrow()
    }

    /// Receiver that wakes on every recompute.
    pub fn subscribe(&self) -> watch::Receiver<CountdownStatus> {
        self.status.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publishes_until_stopped() {
        let ticker = CountdownTicker::start(
            Some(now_ms()),
            Duration::from_secs(10),
            Duration::from_millis(10),
        );
        let mut rx = ticker.subscribe();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_overdue);

        ticker.stop().await;
        // Sender dropped with the task, so the channel closes.
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[tokio::test]
    async fn anchor_change_is_picked_up() {
        let ticker =
            CountdownTicker::start(None, Duration::from_secs(10), Duration::from_millis(10));
        let mut rx = ticker.subscribe();

        ticker.set_last_completed(Some(now_ms() - 60_000));
        let overdue = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                rx.changed().await.unwrap();
                if rx.borrow().is_overdue {
                    break;
                }
            }
        })
        .await;
        assert!(overdue.is_ok());
        ticker.stop().await;
    }

    #[tokio::test]
    async fn drop_cancels() {
        let ticker =
            CountdownTicker::start(None, Duration::from_secs(1), Duration::from_millis(10));
        let token = ticker.cancel.clone();
        drop(ticker);
        assert!(token.is_cancelled());
    }
}
