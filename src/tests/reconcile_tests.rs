use super::*;

fn q(id: &str, text: &str, category: &str) -> Quote {
    Quote::new(QuoteId::from(id), text, category)
}

#[test]
fn disjoint_remote_is_appended() {
    let local = vec![q("a", "A", "C1"), q("b", "B", "C1")];
    let remote = vec![q("server-1", "one", "Server"), q("server-2", "two", "Server")];

    let out = merge(&local, &remote);

    let mut expected = local.clone();
    expected.extend(remote.iter().cloned());
    assert_eq!(out.merged, expected);
    assert_eq!(out.added, 2);
    assert_eq!(out.updated, 0);
    assert!(out.conflicts.is_empty());
}

#[test]
fn identical_overlap_is_noop() {
    let local = vec![q("x", "A", "C1"), q("y", "B", "C2")];
    let remote = vec![q("y", "B", "C2"), q("x", "A", "C1")];

    let out = merge(&local, &remote);

    assert_eq!(out.merged, local);
    assert_eq!(out.added, 0);
    assert_eq!(out.updated, 0);
    assert!(out.conflicts.is_empty());
}

#[test]
fn differing_remote_wins_and_records_conflict() {
    let local = vec![q("x", "A", "C1")];
    let remote = vec![q("x", "B", "C1")];

    let out = merge(&local, &remote);

    assert_eq!(out.merged, vec![q("x", "B", "C1")]);
    assert_eq!(out.updated, 1);
    assert_eq!(out.added, 0);
    assert_eq!(
        out.conflicts,
        vec![ConflictRecord {
            id: QuoteId::from("x"),
            local: q("x", "A", "C1"),
            server: q("x", "B", "C1"),
        }]
    );
}

#[test]
fn category_difference_is_a_conflict() {
    let out = merge(&[q("x", "A", "C1")], &[q("x", "A", "C2")]);
    assert_eq!(out.updated, 1);
    assert_eq!(out.merged[0].category, "C2");
}

#[test]
fn conflicts_follow_remote_order() {
    let local = vec![q("a", "1", "C"), q("b", "2", "C"), q("c", "3", "C")];
    let remote = vec![q("c", "3'", "C"), q("a", "1'", "C")];

    let out = merge(&local, &remote);

    let ids: Vec<&str> = out.conflicts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a"]);
    // In-place replacement keeps local ordering.
    let merged_ids: Vec<&str> = out.merged.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(merged_ids, vec!["a", "b", "c"]);
}

#[test]
fn local_records_absent_from_remote_survive() {
    let local = vec![q("mine", "M", "C"), q("x", "A", "C")];
    let out = merge(&local, &[q("x", "A", "C")]);
    assert_eq!(out.merged, local);
}

#[test]
fn repeated_remote_id_is_added_once() {
    let out = merge(&[], &[q("s", "one", "Server"), q("s", "one", "Server")]);
    assert_eq!(out.added, 1);
    assert_eq!(out.merged.len(), 1);
}

#[test]
fn revert_restores_local_and_clears_conflict() {
    let local = vec![q("x", "A", "C1")];
    let out = merge(&local, &[q("x", "B", "C1")]);

    let mut store = QuoteStore::from_quotes(out.merged);
    let mut pending = PendingConflicts::new();
    pending.replace_all(out.conflicts);

    let restored = pending.revert_to_local(&mut store, &QuoteId::from("x"));
    assert_eq!(restored, Some(q("x", "A", "C1")));
    assert_eq!(store.all(), &[q("x", "A", "C1")]);
    assert!(pending.is_empty());
}

#[test]
fn revert_unknown_conflict_is_noop() {
    let mut store = QuoteStore::from_quotes(vec![q("x", "B", "C1")]);
    let before = store.clone();
    let mut pending = PendingConflicts::new();

    assert!(pending.revert_to_local(&mut store, &QuoteId::from("x")).is_none());
    assert_eq!(store, before);

    // A second revert of an already-resolved conflict is also a no-op.
    pending.replace_all(vec![ConflictRecord {
        id: QuoteId::from("x"),
        local: q("x", "A", "C1"),
        server: q("x", "B", "C1"),
    }]);
    assert!(pending.revert_to_local(&mut store, &QuoteId::from("x")).is_some());
    let after_first = store.clone();
    assert!(pending.revert_to_local(&mut store, &QuoteId::from("x")).is_none());
    assert_eq!(store, after_first);
}

#[test]
fn repeated_remote_id_yields_one_conflict_with_original_local() {
    let local = vec![q("x", "A", "C1")];
    let remote = vec![q("x", "B", "C1"), q("x", "C", "C1")];

    let out = merge(&local, &remote);

    assert_eq!(out.merged, vec![q("x", "C", "C1")]);
    assert_eq!(out.updated, 1);
    assert_eq!(
        out.conflicts,
        vec![ConflictRecord {
            id: QuoteId::from("x"),
            local: q("x", "A", "C1"),
            server: q("x", "C", "C1"),
        }]
    );

    let mut store = QuoteStore::from_quotes(out.merged);
    let mut pending = PendingConflicts::new();
    pending.replace_all(out.conflicts);
    assert_eq!(
        pending.revert_to_local(&mut store, &QuoteId::from("x")),
        Some(q("x", "A", "C1"))
    );
    assert!(pending.is_empty());
    assert_eq!(store.all(), &[q("x", "A", "C1")]);
}

#[test]
fn repeated_remote_id_returning_to_local_value_is_not_a_conflict() {
    let local = vec![q("x", "A", "C1")];
    let out = merge(&local, &[q("x", "B", "C1"), q("x", "A", "C1")]);

    assert_eq!(out.merged, local);
    assert_eq!(out.updated, 0);
    assert!(out.conflicts.is_empty());
}

#[test]
fn repeated_new_remote_id_takes_last_value_without_conflict() {
    let out = merge(&[], &[q("s", "one", "Server"), q("s", "two", "Server")]);
    assert_eq!(out.added, 1);
    assert_eq!(out.merged, vec![q("s", "two", "Server")]);
    assert!(out.conflicts.is_empty());
}
