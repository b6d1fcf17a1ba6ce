use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodic recompute signal owned by a view.
///
/// The first tick fires immediately. Dropping the timer or calling
/// [`RefreshTimer::cancel`] stops the background task, after which
/// [`RefreshTimer::tick`] returns `false` once any buffered tick is drained.
/// Must be started inside a tokio runtime.
pub struct RefreshTimer {
    ticks: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl RefreshTimer {
    pub fn start(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let (tx, ticks) = mpsc::channel(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        log::debug!("Refresh timer started ({:?})", period);
        Self { ticks, handle }
    }

    /// Wait for the next tick. `false` once the timer is cancelled.
    pub async fn tick(&mut self) -> bool {
        self.ticks.recv().await.is_some()
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            log::debug!("Refresh timer cancelled");
        }
        self.handle.abort();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ticks_repeat() {
        let mut timer = RefreshTimer::start(Duration::from_millis(5));
        assert!(timer.tick().await);
        assert!(timer.tick().await);
        assert!(timer.tick().await);
    }

    #[tokio::test]
    async fn cancel_ends_the_stream() {
        let mut timer = RefreshTimer::start(Duration::from_millis(5));
        assert!(timer.tick().await);
        timer.cancel();

        let mut buffered = 0;
        while timer.tick().await {
            buffered += 1;
            assert!(buffered <= 1);
        }
    }
}
