// DB facade tests
// Tests for set/get/delete/count and nested begin/rollback/commit.

use txkv::{DB, Error, Options};

// =============================================================================
// Test 1: Basic set, get, count, delete
// =============================================================================
#[test]
fn basic_set_get_count_delete() {
    let mut db = DB::new();
    assert_eq!(db.get("a"), None);

    db.set("a", "foo").unwrap();
    db.set("b", "foo").unwrap();
    assert_eq!(db.count("foo"), 2);
    assert_eq!(db.count("bar"), 0);

    assert!(db.delete("a"));
    assert_eq!(db.count("foo"), 1);

    db.set("b", "baz").unwrap();
    assert_eq!(db.count("foo"), 0);
    assert_eq!(db.get("b"), Some("baz"));
    assert_eq!(db.get("B"), None);
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 2: Re-setting the same value counts once
// =============================================================================
#[test]
fn same_value_twice_counts_once() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    db.set("a", "foo").unwrap();
    assert_eq!(db.count("foo"), 1);
    assert_eq!(db.get("a"), Some("foo"));

    db.delete("a");
    assert_eq!(db.get("a"), None);
    assert_eq!(db.count("foo"), 0);
}

// =============================================================================
// Test 3: Count reflects live values only
// =============================================================================
#[test]
fn count_ignores_deleted_records() {
    let mut db = DB::new();
    db.set("a", "x").unwrap();
    db.set("b", "x").unwrap();
    db.delete("a");
    assert_eq!(db.count("x"), 1);
}

// =============================================================================
// Test 4: Deleting an absent name twice is a no-op both times
// =============================================================================
#[test]
fn delete_absent_is_idempotent() {
    let mut db = DB::new();
    assert!(!db.delete("ghost"));
    assert!(!db.delete("ghost"));
    assert!(db.is_empty());
}

// =============================================================================
// Test 5: Nested rollback unwinds one level at a time
// =============================================================================
#[test]
fn nested_rollback_unwinds_one_level() {
    let mut db = DB::new();
    db.begin().unwrap();
    db.set("a", "foo").unwrap();
    assert_eq!(db.get("a"), Some("foo"));

    db.begin().unwrap();
    db.set("a", "bar").unwrap();
    assert_eq!(db.get("a"), Some("bar"));
    db.set("a", "baz").unwrap();

    db.rollback().unwrap();
    assert_eq!(db.get("a"), Some("foo"));
    assert_eq!(db.depth(), 1);

    db.rollback().unwrap();
    assert_eq!(db.get("a"), None);
    assert_eq!(db.depth(), 0);
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 6: Rollback of a delete recreates the record
// =============================================================================
#[test]
fn rollback_of_delete_recreates_record() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    let id = db.id_of("a").unwrap();

    db.begin().unwrap();
    db.delete("a");
    assert_eq!(db.get("a"), None);
    db.rollback().unwrap();

    assert_eq!(db.get("a"), Some("foo"));
    assert_eq!(db.id_of("a"), Some(id));
    assert_eq!(db.count("foo"), 1);
}

// =============================================================================
// Test 7: Inner rollback, then commit keeps the outer work
// =============================================================================
#[test]
fn inner_rollback_then_commit() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    db.set("b", "baz").unwrap();

    db.begin().unwrap();
    assert_eq!(db.get("a"), Some("foo"));
    db.set("a", "bar").unwrap();
    assert_eq!(db.count("bar"), 1);

    db.begin().unwrap();
    assert_eq!(db.count("bar"), 1);
    db.delete("a");
    assert_eq!(db.get("a"), None);
    assert_eq!(db.count("bar"), 0);

    db.rollback().unwrap();
    assert_eq!(db.get("a"), Some("bar"));
    assert_eq!(db.count("bar"), 1);

    assert_eq!(db.commit(), 1);
    assert_eq!(db.get("a"), Some("bar"));
    assert_eq!(db.get("b"), Some("baz"));
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 8: Commit at inner depth flattens every level
// =============================================================================
#[test]
fn commit_flattens_all_levels() {
    let mut db = DB::new();
    db.begin().unwrap();
    db.set("a", "1").unwrap();
    db.begin().unwrap();
    db.set("b", "2").unwrap();
    db.delete("a");

    assert_eq!(db.commit(), 2);
    assert!(!db.in_transaction());
    assert_eq!(db.get("a"), None);
    assert_eq!(db.get("b"), Some("2"));

    assert!(matches!(db.rollback(), Err(Error::NoActiveTransaction)));
    assert_eq!(db.get("b"), Some("2"));
}

// =============================================================================
// Test 9: Rollback and commit with nothing open
// =============================================================================
#[test]
fn rollback_and_commit_without_transaction() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();

    assert!(matches!(db.rollback(), Err(Error::NoActiveTransaction)));
    assert_eq!(db.commit(), 0);
    assert_eq!(db.get("a"), Some("foo"));
}

// =============================================================================
// Test 10: Writes outside a transaction leave no undo entries
// =============================================================================
#[test]
fn writes_outside_transaction_are_not_logged() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    db.delete("a");
    assert_eq!(db.stats().pending_undo_entries, 0);

    db.begin().unwrap();
    db.set("a", "foo").unwrap();
    db.set("a", "bar").unwrap();
    db.delete("a");
    db.delete("a"); // no-op, not logged
    assert_eq!(db.stats().pending_undo_entries, 3);
}

// =============================================================================
// Test 11: Rollback of an insert does not recycle ids
// =============================================================================
#[test]
fn rolled_back_insert_id_is_not_reused() {
    let mut db = DB::new();
    db.begin().unwrap();
    db.set("a", "foo").unwrap();
    let rolled_back = db.id_of("a").unwrap();

    db.begin().unwrap();
    db.set("b", "foo").unwrap();
    db.rollback().unwrap();

    let fresh = db.set("c", "foo").unwrap();
    assert!(fresh > rolled_back);
    assert_ne!(Some(fresh), db.id_of("a"));

    db.rollback().unwrap();
    assert!(db.is_empty());
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 12: Rollback restores the exact snapshot, ids included
// =============================================================================
#[test]
fn rollback_restores_exact_snapshot() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    db.set("b", "bar").unwrap();
    db.set("c", "foo").unwrap();
    let before = db.snapshot();

    db.begin().unwrap();
    db.delete("b");
    db.set("b", "bar").unwrap(); // same name, new id
    db.set("a", "qux").unwrap();
    db.delete("c");
    db.set("d", "foo").unwrap();
    db.rollback().unwrap();

    assert_eq!(db.snapshot(), before);
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 13: Stats follow the live state
// =============================================================================
#[test]
fn stats_track_state() {
    let mut db = DB::new();
    db.set("a", "foo").unwrap();
    db.set("b", "foo").unwrap();
    db.set("c", "bar").unwrap();
    db.begin().unwrap();
    db.set("d", "baz").unwrap();

    let stats = db.stats();
    assert_eq!(stats.records, 4);
    assert_eq!(stats.distinct_values, 3);
    assert_eq!(stats.depth, 1);
    assert_eq!(stats.pending_undo_entries, 1);
    assert_eq!(stats.next_id, 5);
    assert_eq!(db.len(), 4);
}

// =============================================================================
// Test 14: Record limit refuses new names but not updates
// =============================================================================
#[test]
fn record_limit_refuses_new_names() {
    let mut db = DB::with_options(Options::new().max_records(2));
    db.set("a", "1").unwrap();
    db.set("b", "2").unwrap();

    let err = db.set("c", "3").unwrap_err();
    assert!(matches!(
        err,
        Error::ResourceExhausted { resource: "records", limit: 2 }
    ));
    assert_eq!(db.get("c"), None);
    assert_eq!(db.len(), 2);

    db.set("a", "updated").unwrap();
    assert_eq!(db.get("a"), Some("updated"));

    db.delete("b");
    db.set("c", "3").unwrap();
    db.verify_integrity().unwrap();
}

// =============================================================================
// Test 15: Refused insert inside a transaction is not logged
// =============================================================================
#[test]
fn refused_insert_is_not_logged() {
    let mut db = DB::with_options(Options::new().max_records(1));
    db.begin().unwrap();
    db.set("a", "1").unwrap();
    assert!(db.set("b", "2").is_err());
    assert_eq!(db.stats().pending_undo_entries, 1);

    db.rollback().unwrap();
    assert!(db.is_empty());
}

// =============================================================================
// Test 16: Depth limit refuses BEGIN
// =============================================================================
#[test]
fn depth_limit_refuses_begin() {
    let mut db = DB::with_options(Options::new().max_depth(2));
    db.begin().unwrap();
    db.begin().unwrap();
    assert!(matches!(
        db.begin(),
        Err(Error::ResourceExhausted { resource: "transaction depth", .. })
    ));
    assert_eq!(db.depth(), 2);

    db.rollback().unwrap();
    db.begin().unwrap();
    assert_eq!(db.depth(), 2);
    assert_eq!(db.options().max_depth, Some(2));
}

// =============================================================================
// Test 17: Error messages
// =============================================================================
#[test]
fn error_display() {
    assert_eq!(Error::NoActiveTransaction.to_string(), "no transaction active");
    let err = Error::ResourceExhausted {
        resource: "records",
        limit: 10,
    };
    assert_eq!(err.to_string(), "resource exhausted: records limit of 10 reached");
}
