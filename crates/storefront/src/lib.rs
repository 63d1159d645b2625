//! Marketplace Storefront session core.
//!
//! This crate holds the client-side session machinery behind the buyer,
//! seller and admin dashboards:
//!
//! - [`storage`] - Durable key/value backends (`FileStorage`, `MemoryStorage`)
//! - [`session`] - Session state, best-effort persistence and the `SessionStore`
//! - [`navigator`] - The navigation capability supplied by the host
//! - [`guard`] - The per-mount `RoleGuard` state machine
//! - [`layouts`] - Which dashboard paths need which role
//!
//! # Example
//!
//! ```rust
//! use marketplace_storefront::guard::{GuardState, RoleGuard};
//! use marketplace_storefront::navigator::MemoryRouter;
//! use marketplace_storefront::session::{SessionPersistence, SessionStore};
//! use marketplace_storefront::storage::MemoryStorage;
//!
//! let store = SessionStore::new(SessionPersistence::new(MemoryStorage::new()));
//! store.hydrate();
//!
//! let router = std::sync::Arc::new(MemoryRouter::new("/seller/dashboard").unwrap());
//! let guard = RoleGuard::new("SELLER").mount(&store, router.clone());
//!
//! assert_eq!(guard.state(), GuardState::LoginRedirect);
//! assert_eq!(router.current(), "/auth/login");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod guard;
pub mod layouts;
pub mod navigator;
pub mod session;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
