//! Periodic retry drain scheduling.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Interval between retry drain cycles.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Explicit start/stop handle for the background drain task.
///
/// The task is spawned on the current thread's `LocalSet`, so [`start`]
/// must be called from within one. Stopping never cancels a cycle
/// mid-batch: shutdown is observed only between ticks, and a batch already
/// dispatched runs to completion.
///
/// [`start`]: SyncScheduler::start
pub struct SyncScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    /// Spawn the drain task, invoking `tick` once per interval
    pub fn start<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let (shutdown, mut observed) = watch::channel(false);
        let handle = tokio::task::spawn_local(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick of an interval resolves immediately
            timer.tick().await;
            loop {
                tokio::select! {
                    _ = observed.changed() => break,
                    _ = timer.tick() => {}
                }
                tick().await;
            }
        });
        Self { shutdown, handle }
    }

    /// Disarm the timer and wait for any in-flight cycle to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
