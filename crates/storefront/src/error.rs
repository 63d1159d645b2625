//! Unified error type for hosts embedding the storefront core.
//!
//! The session store and role guard never return errors; these only come
//! from startup (configuration) and from hosts driving storage or the
//! router directly.

use thiserror::Error;

use crate::config::ConfigError;
use crate::navigator::NavigationError;
use crate::storage::StorageError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The router rejected a navigation.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
