//! Integration tests for dashboard role guards over a file-backed session.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use marketplace_integration_tests::{file_store, profile, sign_in};
use marketplace_storefront::StorefrontConfig;
use marketplace_storefront::guard::{GuardPaths, GuardState, Outlet, RoleGuard};
use marketplace_storefront::layouts::DashboardLayouts;
use marketplace_storefront::navigator::MemoryRouter;
use marketplace_storefront::session::{SessionPersistence, SessionStore};
use marketplace_storefront::storage::MemoryStorage;

fn router(path: &str) -> Arc<MemoryRouter> {
    Arc::new(MemoryRouter::new(path).unwrap())
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_guard_admits_restored_seller() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(dir.path());
    first.hydrate();
    sign_in(&first, "SELLER");

    let store = file_store(dir.path());
    let nav = router("/seller/enquiries");
    let guard = RoleGuard::new("SELLER").mount(&store, Arc::clone(&nav));
    assert_eq!(guard.state(), GuardState::Verifying);

    store.hydrate();
    assert_eq!(guard.state(), GuardState::Verified);
    assert_eq!(guard.render(|| "enquiries"), Outlet::Content("enquiries"));
    assert_eq!(nav.history(), vec!["/seller/enquiries".to_string()]);
}

#[test]
fn test_guard_redirects_restored_buyer_from_admin() {
    let dir = tempfile::tempdir().unwrap();
    let first = file_store(dir.path());
    first.hydrate();
    sign_in(&first, "BUYER");

    let store = file_store(dir.path());
    store.hydrate();
    let nav = router("/admin/dashboard");
    let guard = RoleGuard::new("ADMIN").mount(&store, Arc::clone(&nav));

    assert_eq!(guard.state(), GuardState::DeniedRedirect);
    assert_eq!(nav.current(), "/access-denied");
    assert_eq!(nav.history().len(), 1);
}

#[test]
fn test_guard_sends_empty_storage_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    let nav = router("/buyer/orders");
    let guard = RoleGuard::new("BUYER").mount(&store, Arc::clone(&nav));

    store.hydrate();
    assert_eq!(guard.state(), GuardState::LoginRedirect);
    assert_eq!(nav.current(), "/auth/login");
    assert_eq!(guard.render(|| ()), Outlet::Loading);
}

#[test]
fn test_guard_waits_for_profile_after_token_only_restore() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("userState.json"),
        r#"{"profile":null,"accessToken":"access-token-1","refreshToken":null}"#,
    )
    .unwrap();

    let store = file_store(dir.path());
    store.hydrate();
    assert!(store.snapshot().is_authenticated());

    let nav = router("/seller/dashboard");
    let guard = RoleGuard::new("SELLER").mount(&store, Arc::clone(&nav));
    assert_eq!(guard.state(), GuardState::Verifying);

    store.profile_loaded(profile("SELLER"));
    assert_eq!(guard.state(), GuardState::Verified);
    assert_eq!(nav.current(), "/seller/dashboard");
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_unmounted_guard_stops_listening() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    store.hydrate();
    sign_in(&store, "SELLER");

    let nav = router("/seller/dashboard");
    let guard = RoleGuard::new("SELLER").mount(&store, Arc::clone(&nav));
    assert_eq!(store.listener_count(), 1);

    guard.unmount();
    assert_eq!(store.listener_count(), 0);

    store.logout();
    assert_eq!(nav.current(), "/seller/dashboard");
}

#[test]
fn test_verified_guard_ignores_later_logout() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    store.hydrate();
    sign_in(&store, "ADMIN");

    let nav = router("/admin/users");
    let guard = RoleGuard::new("ADMIN").mount(&store, Arc::clone(&nav));
    assert_eq!(guard.state(), GuardState::Verified);

    store.logout();
    assert_eq!(guard.state(), GuardState::Verified);

    // A fresh mount sees the signed-out session
    let remount = RoleGuard::new("ADMIN").mount(&store, Arc::clone(&nav));
    assert_eq!(remount.state(), GuardState::LoginRedirect);
    assert_eq!(nav.current(), "/auth/login");
}

#[test]
fn test_quota_failure_keeps_session_usable() {
    let config = StorefrontConfig::default().with_storage_quota_bytes(Some(16));
    let storage = Arc::new(MemoryStorage::from_config(&config));
    let store = SessionStore::new(SessionPersistence::new(Arc::clone(&storage)));
    store.hydrate();
    sign_in(&store, "BUYER");

    let nav = router("/buyer/orders");
    let guard = RoleGuard::new("BUYER").mount(&store, Arc::clone(&nav));
    assert_eq!(guard.state(), GuardState::Verified);
    assert!(storage.is_empty());
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_layouts_pick_guard_by_segment() {
    let layouts = DashboardLayouts::default();

    assert_eq!(layouts.required_role("/seller/enquiries"), Some("SELLER"));
    assert_eq!(layouts.required_role("/seller"), Some("SELLER"));
    assert_eq!(layouts.required_role("/sellers"), None);
    assert_eq!(layouts.required_role("/buyer?tab=orders"), Some("BUYER"));
    assert_eq!(layouts.required_role("/"), None);
}

#[test]
fn test_layout_guard_uses_custom_paths() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_store(dir.path());
    store.hydrate();
    sign_in(&store, "BUYER");

    let layouts = DashboardLayouts::default();
    let layout = layouts.layout_for("/seller/products").unwrap();
    let paths = GuardPaths {
        login: "/signin".to_string(),
        access_denied: "/unauthorized".to_string(),
    };

    let nav = router("/seller/products");
    let guard = layout.guard(paths).mount(&store, Arc::clone(&nav));
    assert_eq!(guard.state(), GuardState::DeniedRedirect);
    assert_eq!(nav.current(), "/unauthorized");
}
