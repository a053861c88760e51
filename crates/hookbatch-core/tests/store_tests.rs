// Rust guideline compliant 2026-02-06

//! Integration tests for the progress record store.

use chrono::Utc;
use hookbatch_core::{Error, ProgressRecord, RecordStore};
use serde_json::json;
use tempfile::TempDir;

fn setup() -> (TempDir, RecordStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = RecordStore::new(temp_dir.path().join("state")).expect("Failed to create store");
    (temp_dir, store)
}

#[test]
fn test_load_missing_record_returns_fresh_record() {
    let (_temp_dir, store) = setup();
    let record = store.load("never_run").expect("Failed to load");
    assert_eq!(record, ProgressRecord::new());
    assert!(!store.exists("never_run").unwrap());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_dir, store) = setup();
    let mut record = ProgressRecord {
        finished: 0.4,
        cursor: 2,
        total: Some(5),
        fingerprint: Some("abc".to_string()),
        started_at: Some(Utc::now()),
        invocations: 1,
        message: Some("processed 2 of 5 items (40.00%)".to_string()),
        ..ProgressRecord::default()
    };
    record.insert("last_tid", json!(17)).unwrap();

    store.save("terms_update", &record).expect("Failed to save");
    assert!(store.exists("terms_update").unwrap());

    let loaded = store.load("terms_update").expect("Failed to load");
    assert_eq!(loaded, record);
    assert_eq!(loaded.get("last_tid"), Some(&json!(17)));
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (_temp_dir, store) = setup();
    store.save("clean", &ProgressRecord::new()).unwrap();

    let entries: Vec<_> = std::fs::read_dir(store.dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec!["clean.json".to_string()]);
}

#[test]
fn test_delete() {
    let (_temp_dir, store) = setup();
    store.save("gone", &ProgressRecord::new()).unwrap();
    assert!(store.delete("gone").unwrap());
    assert!(!store.delete("gone").unwrap());
    assert!(!store.exists("gone").unwrap());
}

#[test]
fn test_delete_inside_lock_removes_lock_file() {
    let (_temp_dir, store) = setup();
    let lock_path = store.path_for("locked").unwrap().with_extension("lock");

    let deleted = store
        .with_lock("locked", || {
            store.save("locked", &ProgressRecord::new())?;
            assert!(lock_path.exists());
            store.delete("locked")
        })
        .unwrap();

    assert!(deleted);
    assert!(!lock_path.exists());
    assert_eq!(std::fs::read_dir(store.dir()).unwrap().count(), 0);
}

#[test]
fn test_record_shadowing_typed_field_is_not_saved() {
    let (_temp_dir, store) = setup();
    let mut record = ProgressRecord {
        cursor: 2,
        ..ProgressRecord::default()
    };
    store.save("shadowed", &record).unwrap();

    record.extra.insert("cursor".to_string(), json!(3));
    assert!(matches!(
        store.save("shadowed", &record),
        Err(Error::ReservedKey(ref key)) if key == "cursor"
    ));

    let loaded = store.load("shadowed").expect("Saved record stays loadable");
    assert_eq!(loaded.cursor, 2);
}

#[test]
fn test_invalid_run_id_rejected() {
    let (_temp_dir, store) = setup();
    assert!(matches!(store.load("../escape"), Err(Error::InvalidRunId(_))));
    assert!(matches!(
        store.save("", &ProgressRecord::new()),
        Err(Error::InvalidRunId(_))
    ));
}

#[test]
fn test_corrupt_record_is_an_error() {
    let (_temp_dir, store) = setup();
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.path_for("bad").unwrap(), "{ not json").unwrap();
    assert!(matches!(store.load("bad"), Err(Error::Json(_))));
}

#[test]
fn test_nested_lock_for_same_run_fails_fast() {
    let (_temp_dir, store) = setup();
    let result = store.with_lock("busy", || store.with_lock("busy", || Ok(())));
    assert!(matches!(result, Err(Error::Locked(ref id)) if id == "busy"));
}

#[test]
fn test_lock_released_after_closure() {
    let (_temp_dir, store) = setup();
    store.with_lock("again", || Ok(())).unwrap();
    let value = store.with_lock("again", || Ok(5)).unwrap();
    assert_eq!(value, 5);
}

#[test]
fn test_locks_for_different_runs_do_not_conflict() {
    let (_temp_dir, store) = setup();
    let value = store
        .with_lock("one", || store.with_lock("two", || Ok("inner")))
        .unwrap();
    assert_eq!(value, "inner");
}
