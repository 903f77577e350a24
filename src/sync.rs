//! One sync cycle against the feed, and the periodic task that drives it.
//!
//! At most one cycle runs at a time: a cycle requested while another is in flight is
//! coalesced into the running one. The fetch is the only suspension point; the merge and
//! the save run under the session lock without yielding.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::model::{ConflictRecord, Quote};
use crate::remote::{QuoteFeed, spawn_post};
use crate::session::Session;

mod scheduler;

pub use self::scheduler::{SyncHandle, spawn_periodic};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub conflicts: Vec<ConflictRecord>,
    /// Completion time, epoch millis.
    pub synced_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncReport),
    /// Another cycle was already running.
    Skipped,
    /// Nothing was merged; the message is meant for the user.
    Failed(String),
}

/// Latest state published by the periodic task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Synced(SyncReport),
    Failed(String),
}

pub struct SyncEngine<F> {
    session: Arc<Mutex<Session>>,
    feed: Arc<F>,
    timeout: Duration,
    in_flight: AtomicBool,
}

impl<F: QuoteFeed + 'static> SyncEngine<F> {
    pub fn new(session: Arc<Mutex<Session>>, feed: Arc<F>, timeout: Duration) -> Self {
        Self {
            session,
            feed,
            timeout,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Arc<Mutex<Session>> {
        &self.session
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn sync_once(&self) -> SyncOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!("sync already in flight, coalescing");
            return SyncOutcome::Skipped;
        };

        self.session.lock().await.begin_sync();

        let remote = match tokio::time::timeout(self.timeout, self.feed.fetch_quotes()).await {
            Ok(Ok(quotes)) => quotes,
            Ok(Err(err)) => {
                tracing::warn!("sync failed: {}", err);
                return SyncOutcome::Failed(failure_message());
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "sync timed out");
                return SyncOutcome::Failed(failure_message());
            }
        };

        let mut session = self.session.lock().await;
        match session.apply_remote(&remote) {
            Ok(report) => {
                tracing::info!(
                    added = report.added,
                    updated = report.updated,
                    conflicts = report.conflicts.len(),
                    "sync complete"
                );
                SyncOutcome::Completed(report)
            }
            Err(err) => {
                tracing::warn!("sync could not be saved: {:#}", err);
                SyncOutcome::Failed(format!("Sync failed: {:#}", err))
            }
        }
    }

    /// Adds a local quote and, when configured, posts it to the feed in the background.
    pub async fn add_quote(&self, text: &str, category: &str) -> Result<Quote> {
        let (quote, post) = {
            let mut session = self.session.lock().await;
            let quote = session.add_quote(text, category)?;
            (quote, session.config().post_new_quotes)
        };
        if post {
            spawn_post(self.feed.clone(), quote.clone());
        }
        Ok(quote)
    }
}

fn failure_message() -> String {
    "Sync failed. Check your connection.".to_string()
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub(crate) fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
