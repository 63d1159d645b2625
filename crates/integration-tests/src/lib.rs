//! Integration tests for the marketplace session core.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_persistence` - Store and persistence against real file storage
//! - `role_guard` - Guards reacting to store notifications across reloads
//!
//! This library only holds shared fixtures.

use marketplace_core::{AccessToken, AccountFlags, Email, Profile, RefreshToken, Role, UserId};
use marketplace_storefront::session::{SessionPersistence, SessionStore};
use marketplace_storefront::storage::FileStorage;

/// A verified profile with the given role.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn profile(role: &str) -> Profile {
    Profile {
        id: UserId::new("64f1c0a9e4b0"),
        name: "Acme Traders".to_string(),
        email: Email::parse("ops@acme.example").unwrap(),
        phone_number: Some("+91 98765 43210".to_string()),
        role: Role::from(role),
        is_verified: true,
        created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
        account_flags: AccountFlags::default(),
        username: "acme".to_string(),
    }
}

/// Fresh, unhydrated store backed by files in `dir`.
#[must_use]
pub fn file_store(dir: &std::path::Path) -> SessionStore {
    SessionStore::new(SessionPersistence::new(FileStorage::new(dir)))
}

/// Sign `store` in as `role`.
pub fn sign_in(store: &SessionStore, role: &str) {
    store.begin_auth();
    store.auth_succeeded(
        profile(role),
        AccessToken::new("access-token-1"),
        RefreshToken::new("refresh-token-1"),
    );
}
