//! Server-wins merge of a remote snapshot into the local list.

use std::collections::HashMap;

use crate::model::{ConflictRecord, Quote, QuoteId};
use crate::store::QuoteStore;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: Vec<Quote>,
    pub added: usize,
    pub updated: usize,
    /// In remote input order.
    pub conflicts: Vec<ConflictRecord>,
}

/// Merges `remote` into `local`.
///
/// Unknown ids are appended. Known ids with different text or category are overwritten in
/// place by the remote value and the previous local value is kept in a conflict record.
/// Local records missing from `remote` are left alone.
///
/// An id repeated within `remote` ends up with its last remote value. It yields at most one
/// conflict, holding the local value from before the merge, and none when that last value
/// matches the local one again or the id was not local to begin with.
pub fn merge(local: &[Quote], remote: &[Quote]) -> MergeOutcome {
    let mut merged = local.to_vec();
    let mut index: HashMap<QuoteId, usize> = merged
        .iter()
        .enumerate()
        .map(|(i, q)| (q.id.clone(), i))
        .collect();

    let mut added = 0;
    let mut conflicts: Vec<ConflictRecord> = Vec::new();
    let mut conflict_at: HashMap<QuoteId, usize> = HashMap::new();

    for server in remote {
        let Some(&i) = index.get(&server.id) else {
            index.insert(server.id.clone(), merged.len());
            merged.push(server.clone());
            added += 1;
            continue;
        };
        if merged[i].same_content(server) {
            continue;
        }

        let previous = std::mem::replace(&mut merged[i], server.clone());
        if i >= local.len() {
            // Appended earlier in this merge: no local value to protect.
            continue;
        }
        match conflict_at.get(&server.id) {
            Some(&c) => conflicts[c].server = server.clone(),
            None => {
                tracing::debug!(id = %server.id, "remote value wins");
                conflict_at.insert(server.id.clone(), conflicts.len());
                conflicts.push(ConflictRecord {
                    id: server.id.clone(),
                    local: previous,
                    server: server.clone(),
                });
            }
        }
    }

    conflicts.retain(|c| !c.local.same_content(&c.server));

    MergeOutcome {
        merged,
        added,
        updated: conflicts.len(),
        conflicts,
    }
}

/// Conflicts from the latest merge that the user has not resolved yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingConflicts {
    records: Vec<ConflictRecord>,
}

impl PendingConflicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[ConflictRecord] {
        &self.records
    }

    pub fn get(&self, id: &QuoteId) -> Option<&ConflictRecord> {
        self.records.iter().find(|c| &c.id == id)
    }

    /// Replaces the pending set with the conflicts of a new cycle.
    pub fn replace_all(&mut self, records: Vec<ConflictRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Restores the recorded local value of a pending conflict and drops the conflict.
    ///
    /// Returns the restored quote, or `None` when `id` is not pending; the store is then
    /// left unchanged.
    pub fn revert_to_local(&mut self, store: &mut QuoteStore, id: &QuoteId) -> Option<Quote> {
        let pos = self.records.iter().position(|c| &c.id == id)?;
        let record = self.records.remove(pos);
        let local = record.local;
        if store.replace(local.clone()).is_none() {
            tracing::warn!(id = %id, "conflict refers to a quote no longer in the store");
            return None;
        }
        tracing::info!(id = %id, "kept local version");
        Some(local)
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
