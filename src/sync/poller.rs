//! Cancellable repeating task on the tokio timer

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Calls `tick` every `period` until cancelled or dropped
///
/// The first call happens one full period after spawning. Ticks missed
/// while the runtime was busy are skipped rather than bunched up.
pub struct PollTask {
    handle: JoinHandle<()>,
}

impl PollTask {
    /// Must be called from within a tokio runtime
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await; // Skip first immediate tick
            loop {
                interval.tick().await;
                if !tick() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
