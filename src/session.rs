//! State of one running application: the quote store, its persistence, the pending
//! conflicts of the last sync and the user's settings.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{ALL_CATEGORIES, AppConfig, Quote, QuoteId, RawQuote, seed_quotes};
use crate::persist::Persistence;
use crate::reconcile::{PendingConflicts, merge};
use crate::store::{QuoteStore, normalize, pick_random};
use crate::sync::{SyncReport, now_millis};

pub struct Session {
    store: QuoteStore,
    persistence: Persistence,
    pending: PendingConflicts,
    config: AppConfig,
}

impl Session {
    /// Loads the persisted list, or the seed quotes when there is none (or it is unreadable).
    /// The list is written back only when seeding or normalization changed it, so opening
    /// a clean directory leaves it untouched.
    pub fn open(persistence: Persistence, config: AppConfig) -> Result<Self> {
        let (quotes, dirty) = match persistence.load_raw() {
            Some(raw) => {
                let quotes = normalize(raw.clone());
                let dirty = quotes.iter().cloned().map(RawQuote::from).ne(raw);
                (quotes, dirty)
            }
            None => {
                tracing::info!("no stored quotes, starting from seed data");
                (seed_quotes(), true)
            }
        };
        let store = QuoteStore::from_quotes(quotes);
        if dirty {
            persistence.save(store.all())?;
        }

        Ok(Self {
            store,
            persistence,
            pending: PendingConflicts::new(),
            config,
        })
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pending_conflicts(&self) -> &PendingConflicts {
        &self.pending
    }

    /// Validates, appends and saves. A validation failure leaves the store untouched and
    /// surfaces as a `QuoteError::Validation` in the error chain. So does a failed save.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote> {
        let mut staged = self.store.clone();
        let quote = staged.add(text, category)?;
        self.persistence.save(staged.all())?;
        self.store = staged;
        Ok(quote)
    }

    /// Persisted category filter, `"all"` when none is set.
    pub fn selected_category(&self) -> String {
        self.persistence
            .load_selected_category()
            .unwrap_or_else(|| ALL_CATEGORIES.to_string())
    }

    pub fn set_selected_category(&mut self, category: &str) -> Result<()> {
        let category = category.trim();
        let category = if category.is_empty() {
            ALL_CATEGORIES
        } else {
            category
        };
        self.persistence.save_selected_category(category)
    }

    /// Category options for a filter control: `"all"` followed by the distinct categories.
    pub fn category_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.store.categories())
            .collect()
    }

    /// Quotes under the persisted filter.
    pub fn visible_quotes(&self) -> Vec<Quote> {
        self.store.by_category(&self.selected_category())
    }

    /// Picks a random quote from `category` (or the persisted filter) and remembers it as
    /// the last viewed quote of this session. `None` when nothing matches.
    pub fn show_random(&self, category: Option<&str>) -> Result<Option<Quote>> {
        let category = match category {
            Some(c) => c.to_string(),
            None => self.selected_category(),
        };
        let subset = self.store.by_category(&category);
        let Some(quote) = pick_random(&subset).cloned() else {
            return Ok(None);
        };
        self.persistence.save_last_viewed(&quote)?;
        Ok(Some(quote))
    }

    pub fn last_viewed(&self) -> Option<Quote> {
        self.persistence.load_last_viewed()
    }

    /// Epoch millis of the last successful sync.
    pub fn last_sync_at(&self) -> Option<i64> {
        self.persistence.load_last_sync()
    }

    /// Start of a sync cycle: conflicts of the previous cycle expire.
    pub fn begin_sync(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(count = self.pending.len(), "dropping unresolved conflicts");
        }
        self.pending.clear();
    }

    /// Merges a fetched snapshot, saves the result and records the sync time. When saving
    /// fails the in-memory store is left as it was.
    pub fn apply_remote(&mut self, remote: &[Quote]) -> Result<SyncReport> {
        let outcome = merge(self.store.all(), remote);
        self.persistence
            .save(&outcome.merged)
            .context("save merged quotes")?;

        self.store.set_all(outcome.merged);
        self.pending.replace_all(outcome.conflicts.clone());

        let synced_at = now_millis();
        if let Err(err) = self.persistence.save_last_sync(synced_at) {
            tracing::warn!("could not record sync time: {:#}", err);
        }

        Ok(SyncReport {
            added: outcome.added,
            updated: outcome.updated,
            conflicts: outcome.conflicts,
            synced_at,
        })
    }

    /// Restores the local version of a pending conflict. `None` when `id` is not pending.
    /// When saving fails the conflict stays pending and the store is unchanged.
    pub fn keep_local(&mut self, id: &QuoteId) -> Result<Option<Quote>> {
        let mut store = self.store.clone();
        let mut pending = self.pending.clone();
        let Some(restored) = pending.revert_to_local(&mut store, id) else {
            self.pending = pending;
            return Ok(None);
        };
        self.persistence.save(store.all())?;
        self.store = store;
        self.pending = pending;
        Ok(Some(restored))
    }

    /// Full list as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self.store.all()).context("serialize quotes")
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        let json = self.export_json()?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
    }

    /// Appends a JSON array of (possibly partial) quotes after normalizing it. Ids already
    /// in the store are skipped. Returns how many quotes were added.
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<usize> {
        let raw: Vec<RawQuote> =
            serde_json::from_slice(bytes).context("parse import (expected a JSON array)")?;
        let mut staged = self.store.clone();
        let added = staged.extend_new(normalize(raw));
        self.persistence.save(staged.all())?;
        self.store = staged;
        tracing::info!(added, "imported quotes");
        Ok(added)
    }

    pub fn import_from(&mut self, path: &Path) -> Result<usize> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        self.import_json(&bytes)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
