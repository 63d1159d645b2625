//! Marketplace Core - Shared account and session types.
//!
//! This crate provides the types shared by every marketplace component:
//! - `storefront` - Session store, persistence and role guard
//! - `cli` - Command-line host for the storefront core
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no navigation,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for user IDs, emails, roles, profiles and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
