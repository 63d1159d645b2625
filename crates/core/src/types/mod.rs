//! Core types for the marketplace.
//!
//! This module provides type-safe wrappers for account and session concepts.

pub mod email;
pub mod id;
pub mod profile;
pub mod role;
pub mod token;

pub use email::{Email, EmailError};
pub use id::*;
pub use profile::{AccountFlags, Profile};
pub use role::Role;
pub use token::{AccessToken, RefreshToken};
