use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{QuoteFeed, SyncEngine, SyncOutcome, SyncStatus};

/// Running periodic sync. Dropping the handle stops the task at its next suspension point.
pub struct SyncHandle {
    cancel: oneshot::Sender<()>,
    status: watch::Receiver<SyncStatus>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    pub fn status(&self) -> watch::Receiver<SyncStatus> {
        self.status.clone()
    }

    pub fn latest(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    /// Stops the task and waits for it. A cycle cut short before its merge leaves the
    /// store untouched.
    pub async fn cancel(self) {
        let _ = self.cancel.send(());
        let _ = self.task.await;
    }
}

/// Syncs right away and then every `every`. Ticks missed while a cycle runs are skipped.
pub fn spawn_periodic<F>(engine: Arc<SyncEngine<F>>, every: Duration) -> SyncHandle
where
    F: QuoteFeed + 'static,
{
    let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
    let (status_tx, status_rx) = watch::channel(SyncStatus::Idle);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut cancel_rx => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                _ = &mut cancel_rx => break,
                outcome = engine.sync_once() => outcome,
            };

            match outcome {
                SyncOutcome::Completed(report) => {
                    let _ = status_tx.send(SyncStatus::Synced(report));
                }
                SyncOutcome::Failed(msg) => {
                    let _ = status_tx.send(SyncStatus::Failed(msg));
                }
                SyncOutcome::Skipped => {}
            }
        }
        tracing::debug!("periodic sync stopped");
    });

    SyncHandle {
        cancel: cancel_tx,
        status: status_rx,
        task,
    }
}
