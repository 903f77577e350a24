use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::*;
use crate::error::QuoteError;
use crate::persist::{KvStore, MemoryStore};

/// Durable store that counts writes and can be told to reject them.
#[derive(Clone, Default)]
struct FlakyDisk {
    inner: Arc<MemoryStore>,
    reject_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FlakyDisk {
    fn reject(&self, on: bool) {
        self.reject_writes.store(on, Ordering::SeqCst);
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn persistence(&self) -> Persistence {
        Persistence::new(Box::new(self.clone()), Box::new(MemoryStore::default()))
    }
}

impl KvStore for FlakyDisk {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}

fn open_memory() -> Session {
    Session::open(Persistence::in_memory(), AppConfig::default()).unwrap()
}

fn q(id: &str, text: &str, category: &str) -> Quote {
    Quote::new(QuoteId::from(id), text, category)
}

#[test]
fn opens_with_seed_data_when_nothing_is_stored() {
    let s = open_memory();
    assert_eq!(s.store().all(), seed_quotes().as_slice());
}

#[test]
fn reopens_from_persisted_list() {
    let tmp = tempfile::tempdir().unwrap();
    let added = {
        let mut s = Session::open(Persistence::open_dir(tmp.path()), AppConfig::default()).unwrap();
        s.add_quote("Persist me", "Life").unwrap()
    };
    let s = Session::open(Persistence::open_dir(tmp.path()), AppConfig::default()).unwrap();
    assert_eq!(s.store().all().last(), Some(&added));
}

#[test]
fn falls_back_to_seed_on_corrupt_storage() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("quotes.json"), b"[{]").unwrap();
    let s = Session::open(Persistence::open_dir(tmp.path()), AppConfig::default()).unwrap();
    assert_eq!(s.store().len(), seed_quotes().len());
}

#[test]
fn invalid_add_is_reported_and_leaves_store_alone() {
    let mut s = open_memory();
    let before = s.store().len();
    let err = s.add_quote("", "cat").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuoteError>(),
        Some(QuoteError::Validation(_))
    ));
    assert_eq!(s.store().len(), before);
}

#[test]
fn conflict_then_keep_local() {
    let mut s = open_memory();
    let report = s
        .apply_remote(&[q("seed-1", "Changed upstream", "Motivation")])
        .unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(s.pending_conflicts().len(), 1);
    assert_eq!(
        s.store().get(&QuoteId::from("seed-1")).unwrap().text,
        "Changed upstream"
    );

    let restored = s.keep_local(&QuoteId::from("seed-1")).unwrap().unwrap();
    assert_eq!(restored, seed_quotes()[0]);
    assert_eq!(s.store().get(&QuoteId::from("seed-1")), Some(&seed_quotes()[0]));
    assert!(s.pending_conflicts().is_empty());

    assert!(s.keep_local(&QuoteId::from("seed-1")).unwrap().is_none());
}

#[test]
fn begin_sync_expires_pending_conflicts() {
    let mut s = open_memory();
    s.apply_remote(&[q("seed-2", "other", "Life")]).unwrap();
    assert!(!s.pending_conflicts().is_empty());
    s.begin_sync();
    assert!(s.pending_conflicts().is_empty());
}

#[test]
fn apply_remote_records_sync_time() {
    let mut s = open_memory();
    assert!(s.last_sync_at().is_none());
    let report = s.apply_remote(&[]).unwrap();
    assert_eq!(s.last_sync_at(), Some(report.synced_at));
}

#[test]
fn show_random_respects_filter_and_remembers_quote() {
    let mut s = open_memory();
    s.set_selected_category("Programming").unwrap();
    let shown = s.show_random(None).unwrap().unwrap();
    assert_eq!(shown.category, "Programming");
    assert_eq!(s.last_viewed(), Some(shown));

    assert!(s.show_random(Some("Nothing here")).unwrap().is_none());
}

#[test]
fn blank_filter_means_all() {
    let mut s = open_memory();
    s.set_selected_category("  ").unwrap();
    assert_eq!(s.selected_category(), "all");
    assert_eq!(s.visible_quotes().len(), s.store().len());
    assert_eq!(s.category_options()[0], "all");
}

#[test]
fn import_normalizes_and_skips_known_ids() {
    let mut s = open_memory();
    let before = s.store().len();
    let added = s
        .import_json(br#"[{"text":"fresh"},{"id":"seed-1","text":"dup"},{"id":"x","text":"x","category":""}]"#)
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(s.store().len(), before + 2);
    assert_eq!(s.store().get(&QuoteId::from("x")).unwrap().category, "General");
}

#[test]
fn import_rejects_non_array() {
    let mut s = open_memory();
    assert!(s.import_json(br#"{"text":"x"}"#).is_err());
}

#[test]
fn export_is_pretty_json_of_all_quotes() {
    let s = open_memory();
    let json = s.export_json().unwrap();
    assert!(json.contains("\n  "));
    let back: Vec<Quote> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s.store().all());
}

#[test]
fn failed_save_does_not_commit_add() {
    let disk = FlakyDisk::default();
    let mut s = Session::open(disk.persistence(), AppConfig::default()).unwrap();
    let before = s.store().clone();

    disk.reject(true);
    assert!(s.add_quote("Never saved", "Life").is_err());
    assert_eq!(s.store(), &before);

    disk.reject(false);
    s.add_quote("Saved", "Life").unwrap();
    let reopened = Session::open(disk.persistence(), AppConfig::default()).unwrap();
    assert_eq!(reopened.store().len(), before.len() + 1);
    assert!(reopened.store().all().iter().all(|q| q.text != "Never saved"));
}

#[test]
fn failed_save_keeps_conflict_pending() {
    let disk = FlakyDisk::default();
    let mut s = Session::open(disk.persistence(), AppConfig::default()).unwrap();
    s.apply_remote(&[q("seed-1", "Changed upstream", "Motivation")])
        .unwrap();
    let id = QuoteId::from("seed-1");

    disk.reject(true);
    assert!(s.keep_local(&id).is_err());
    assert_eq!(s.pending_conflicts().len(), 1);
    assert_eq!(s.store().get(&id).unwrap().text, "Changed upstream");

    disk.reject(false);
    let restored = s.keep_local(&id).unwrap().unwrap();
    assert_eq!(restored, seed_quotes()[0]);
    assert!(s.pending_conflicts().is_empty());
}

#[test]
fn failed_save_does_not_commit_import() {
    let disk = FlakyDisk::default();
    let mut s = Session::open(disk.persistence(), AppConfig::default()).unwrap();
    let before = s.store().clone();

    disk.reject(true);
    assert!(s.import_json(br#"[{"text":"a"},{"text":"b"}]"#).is_err());
    assert_eq!(s.store(), &before);
}

#[test]
fn opening_clean_data_does_not_rewrite_it() {
    let disk = FlakyDisk::default();
    disk.persistence().save(&seed_quotes()).unwrap();
    assert_eq!(disk.writes(), 1);

    let s = Session::open(disk.persistence(), AppConfig::default()).unwrap();
    assert_eq!(s.store().len(), seed_quotes().len());
    assert_eq!(disk.writes(), 1);
}

#[test]
fn opening_seeds_or_legacy_data_writes_back() {
    let empty = FlakyDisk::default();
    Session::open(empty.persistence(), AppConfig::default()).unwrap();
    assert_eq!(empty.writes(), 1);

    let legacy = FlakyDisk::default();
    legacy
        .inner
        .set("quotes", br#"[{"text":"old one"}]"#)
        .unwrap();
    let s = Session::open(legacy.persistence(), AppConfig::default()).unwrap();
    assert_eq!(legacy.writes(), 1);
    assert_eq!(legacy.persistence().load(), Some(s.store().all().to_vec()));
}
