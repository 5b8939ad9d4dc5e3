//! Integration tests for salvager-store
//!
//! These tests verify the load/save cycle for checklist slots.

use rusqlite::Connection;
use salvager_domain::traits::{ChecklistEntries, ChecklistStore};
use salvager_store::{SqliteChecklistStore, StoreError, DEFAULT_CHECKLIST_SLOT};
use tempfile::TempDir;

fn entries(pairs: &[(&str, bool)]) -> ChecklistEntries {
    pairs
        .iter()
        .map(|(key, done)| (key.to_string(), *done))
        .collect()
}

#[test]
fn test_store_initialization() {
    let store = SqliteChecklistStore::new(":memory:", DEFAULT_CHECKLIST_SLOT);
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_empty_slot_loads_empty_map() {
    let store = SqliteChecklistStore::new(":memory:", DEFAULT_CHECKLIST_SLOT).unwrap();
    let loaded = store.load().unwrap();
    assert!(loaded.is_empty(), "Absent slot means every tier is incomplete");
}

#[test]
fn test_save_and_load() {
    let mut store = SqliteChecklistStore::new(":memory:", DEFAULT_CHECKLIST_SLOT).unwrap();
    let saved = entries(&[
        ("Refiner_1", true),
        ("Gun_Smith_Bench_2", true),
        ("scrappy_level_3", false),
        ("quest_q1", true),
    ]);

    store.save(&saved).unwrap();
    assert_eq!(store.load().unwrap(), saved);
}

#[test]
fn test_save_replaces_whole_map() {
    let mut store = SqliteChecklistStore::new(":memory:", DEFAULT_CHECKLIST_SLOT).unwrap();
    store.save(&entries(&[("Refiner_1", true), ("Refiner_2", true)])).unwrap();
    store.save(&entries(&[("Refiner_1", true)])).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(!loaded.contains_key("Refiner_2"));
}

#[test]
fn test_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checklist.db");

    {
        let mut store = SqliteChecklistStore::new(&path, DEFAULT_CHECKLIST_SLOT).unwrap();
        store.save(&entries(&[("project_expedition_stage_2", true)])).unwrap();
    }

    let store = SqliteChecklistStore::new(&path, DEFAULT_CHECKLIST_SLOT).unwrap();
    assert_eq!(
        store.load().unwrap().get("project_expedition_stage_2"),
        Some(&true)
    );
}

#[test]
fn test_slots_are_isolated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checklist.db");

    let mut first = SqliteChecklistStore::new(&path, "profile.a").unwrap();
    first.save(&entries(&[("quest_q1", true)])).unwrap();

    let second = SqliteChecklistStore::new(&path, "profile.b").unwrap();
    assert!(second.load().unwrap().is_empty());
    assert_eq!(second.slot(), "profile.b");
}

#[test]
fn test_corrupt_slot_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checklist.db");
    let store = SqliteChecklistStore::new(&path, DEFAULT_CHECKLIST_SLOT).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO slots (slot, value, updated_at) VALUES (?1, '\"oops\"', 0)",
        [DEFAULT_CHECKLIST_SLOT],
    )
    .unwrap();

    assert!(matches!(store.load(), Err(StoreError::InvalidData(_))));
}
