//! Integration tests for the session store against on-disk storage.
//!
//! These tests simulate page reloads by opening a second store over the
//! same storage directory.

#![allow(clippy::unwrap_used)]

use marketplace_integration_tests::{file_store, profile, sign_in};
use marketplace_storefront::session::{LoadingStatus, SessionPersistence};
use marketplace_storefront::storage::{FileStorage, Storage};

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_session_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(dir.path());
    first.hydrate();
    sign_in(&first, "SELLER");

    let reloaded = file_store(dir.path());
    reloaded.hydrate();
    let session = reloaded.snapshot();

    assert_eq!(session.authenticated(), Some(true));
    assert_eq!(session.profile, Some(profile("SELLER")));
    assert_eq!(session.persisted(), first.snapshot().persisted());
}

#[test]
fn test_transient_fields_are_not_restored() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(dir.path());
    first.hydrate();
    sign_in(&first, "BUYER");
    first.begin_auth();
    assert_eq!(first.snapshot().loading, LoadingStatus::Pending);

    let reloaded = file_store(dir.path());
    reloaded.hydrate();
    let session = reloaded.snapshot();
    assert_eq!(session.loading, LoadingStatus::Idle);
    assert_eq!(session.error, None);
}

#[test]
fn test_logout_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(dir.path());
    first.hydrate();
    sign_in(&first, "ADMIN");
    first.logout();

    let reloaded = file_store(dir.path());
    reloaded.hydrate();
    assert_eq!(reloaded.snapshot().authenticated(), Some(false));
}

#[test]
fn test_auth_failure_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    store.hydrate();
    sign_in(&store, "BUYER");
    assert!(dir.path().join("userState.json").exists());

    store.auth_failed("Invalid credentials");
    assert!(!dir.path().join("userState.json").exists());
    assert_eq!(store.snapshot().error.as_deref(), Some("Invalid credentials"));
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_corrupted_file_hydrates_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("userState.json"), "{\"profile\": {\"id\":").unwrap();

    let store = file_store(dir.path());
    store.hydrate();
    let session = store.snapshot();
    assert_eq!(session.authenticated(), Some(false));
    assert!(session.profile.is_none());
}

#[test]
fn test_foreign_json_hydrates_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("userState.json"), "[1, 2, 3]").unwrap();

    let persistence = SessionPersistence::new(FileStorage::new(dir.path()));
    assert!(persistence.load().is_empty());
}

#[test]
fn test_unreadable_storage_dir_hydrates_as_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the storage directory should be
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let store = file_store(&blocker);
    store.hydrate();
    assert_eq!(store.snapshot().authenticated(), Some(false));

    sign_in(&store, "SELLER");

    // Writing failed, but the in-memory session is intact
    assert!(store.snapshot().is_authenticated());
    assert!(FileStorage::new(&blocker).get_item("userState").is_err());
}

#[test]
fn test_stored_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    store.hydrate();
    sign_in(&store, "SELLER");

    let raw = std::fs::read_to_string(dir.path().join("userState.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"profile"));
    assert!(keys.contains(&"accessToken"));
    assert!(keys.contains(&"refreshToken"));
    assert_eq!(value["profile"]["createdAt"], "2024-03-01T09:30:00Z");
}
