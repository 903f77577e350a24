//! Quote list persistence on top of key-value byte stores.
//!
//! Two scopes: a durable store (quote list, selected filter, last sync time) and a
//! session store (last viewed quote) that does not outlive the running session.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::QuoteError;
use crate::model::{Quote, RawQuote};
use crate::store::normalize;

mod kv;

pub use self::kv::{DirStore, KvStore, MemoryStore};
pub(crate) use self::kv::write_atomic;

pub const QUOTES_KEY: &str = "quotes";
pub const SELECTED_CATEGORY_KEY: &str = "selected_category";
pub const LAST_SYNC_KEY: &str = "last_sync_at";
pub const LAST_VIEWED_KEY: &str = "last_viewed_quote";

pub struct Persistence {
    durable: Box<dyn KvStore>,
    session: Box<dyn KvStore>,
}

impl Persistence {
    pub fn new(durable: Box<dyn KvStore>, session: Box<dyn KvStore>) -> Self {
        Self { durable, session }
    }

    /// Durable scope backed by `dir`, session scope in memory.
    pub fn open_dir(dir: &Path) -> Self {
        Self::new(
            Box::new(DirStore::new(dir)),
            Box::new(MemoryStore::default()),
        )
    }

    /// Both scopes in memory.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStore::default()),
            Box::new(MemoryStore::default()),
        )
    }

    pub fn save(&self, quotes: &[Quote]) -> Result<()> {
        let bytes = serde_json::to_vec(quotes).context("serialize quotes")?;
        self.durable.set(QUOTES_KEY, &bytes).context("save quotes")
    }

    /// Persisted quotes, normalized. Unreadable data counts as absent.
    pub fn load(&self) -> Option<Vec<Quote>> {
        self.load_raw().map(normalize)
    }

    /// Persisted records as stored, before normalization. Unreadable data counts as absent.
    pub fn load_raw(&self) -> Option<Vec<RawQuote>> {
        match self.try_load_raw() {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("{}; falling back to defaults", err);
                None
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<Vec<Quote>>, QuoteError> {
        Ok(self.try_load_raw()?.map(normalize))
    }

    pub fn try_load_raw(&self) -> Result<Option<Vec<RawQuote>>, QuoteError> {
        let Some(bytes) = self
            .durable
            .get(QUOTES_KEY)
            .map_err(|e| storage_read(QUOTES_KEY, format!("{:#}", e)))?
        else {
            return Ok(None);
        };
        let raw = serde_json::from_slice(&bytes).map_err(|e| storage_read(QUOTES_KEY, e))?;
        Ok(Some(raw))
    }

    pub fn save_selected_category(&self, category: &str) -> Result<()> {
        let bytes = serde_json::to_vec(category).context("serialize selected category")?;
        self.durable
            .set(SELECTED_CATEGORY_KEY, &bytes)
            .context("save selected category")
    }

    pub fn load_selected_category(&self) -> Option<String> {
        let s: String = self.read_json(&*self.durable, SELECTED_CATEGORY_KEY)?;
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    /// Stores the last successful sync as epoch millis.
    pub fn save_last_sync(&self, millis: i64) -> Result<()> {
        let bytes = serde_json::to_vec(&millis).context("serialize last sync time")?;
        self.durable
            .set(LAST_SYNC_KEY, &bytes)
            .context("save last sync time")
    }

    pub fn load_last_sync(&self) -> Option<i64> {
        self.read_json(&*self.durable, LAST_SYNC_KEY)
    }

    pub fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let bytes = serde_json::to_vec(quote).context("serialize last viewed quote")?;
        self.session
            .set(LAST_VIEWED_KEY, &bytes)
            .context("save last viewed quote")
    }

    pub fn load_last_viewed(&self) -> Option<Quote> {
        self.read_json(&*self.session, LAST_VIEWED_KEY)
    }

    /// Soft JSON read: missing, unreadable and malformed values all count as absent.
    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        store: &dyn KvStore,
        key: &str,
    ) -> Option<T> {
        let bytes = self.read_soft(store, key)?;
        match serde_json::from_slice(&bytes) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!("{}", storage_read(key, err));
                None
            }
        }
    }

    fn read_soft(&self, store: &dyn KvStore, key: &str) -> Option<Vec<u8>> {
        match store.get(key) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(key, "read failed: {:#}", err);
                None
            }
        }
    }
}

fn storage_read(key: &str, reason: impl std::fmt::Display) -> QuoteError {
    QuoteError::StorageRead {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
