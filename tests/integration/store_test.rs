//! Integration tests for the profile store.

use modman::persistence::ProfileStore;
use modman::profile::{Profile, SortField, SortSpec};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::tempdir;

fn profile(name: &str, ordinal: u32) -> Profile {
    Profile::new(
        name.to_string(),
        PathBuf::from("/games/mods"),
        PathBuf::from("/games/unused"),
        Some(PathBuf::from("/games/game.exe")),
        ordinal,
    )
}

#[test]
fn test_round_trip_preserves_every_field() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

    let mut saved = profile("Skyrim SE", 2);
    saved.set_sort(SortSpec {
        field: SortField::EnabledState,
        ascending: false,
    });
    store.save_all(std::slice::from_ref(&saved)).unwrap();

    let loaded = store.load_all();
    assert_eq!(loaded.len(), 1);
    let loaded = &loaded[0];
    assert_eq!(loaded.name, "Skyrim SE");
    assert_eq!(loaded.active_path, saved.active_path);
    assert_eq!(loaded.inactive_path, saved.inactive_path);
    assert_eq!(loaded.executable_path, saved.executable_path);
    assert_eq!(loaded.sort_field, SortField::EnabledState);
    assert!(!loaded.sort_ascending);
    assert_eq!(loaded.ordinal_position, 2);
}

#[test]
fn test_records_are_flat_readable_json() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();
    store.save_all(&[profile("Skyrim SE", 0)]).unwrap();

    let raw = std::fs::read_to_string(store.record_path("Skyrim SE")).unwrap();
    for field in [
        "\"name\"",
        "\"activePath\"",
        "\"inactivePath\"",
        "\"executablePath\"",
        "\"sortField\"",
        "\"sortAscending\"",
        "\"ordinalPosition\"",
    ] {
        assert!(raw.contains(field), "record missing {field}: {raw}");
    }
}

#[test]
fn test_save_all_removes_orphaned_records() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

    store
        .save_all(&[profile("one", 0), profile("two", 1), profile("three", 2)])
        .unwrap();
    store.save_all(&[profile("two", 0)]).unwrap();

    let loaded = store.load_all();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "two");
    assert!(!store.record_path("one").exists());
    assert!(!store.record_path("three").exists());
}

#[test]
fn test_unreadable_store_degrades_to_zero_profiles() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();
    std::fs::remove_dir_all(store.profiles_dir()).unwrap();

    // No store directory at all: zero profiles, no panic, no error.
    assert!(store.load_all().is_empty());
}

#[test]
fn test_load_orders_by_ordinal_position() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

    store
        .save_all(&[profile("zebra", 0), profile("aardvark", 1)])
        .unwrap();
    let names: Vec<String> = store.load_all().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["zebra", "aardvark"]);
}
