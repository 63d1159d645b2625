//! CLI command implementations.

pub mod session;
pub mod visit;

use marketplace_storefront::StorefrontConfig;
use marketplace_storefront::session::{SessionPersistence, SessionStore};
use marketplace_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Storefront(#[from] marketplace_storefront::StorefrontError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Empty display name.
    #[error("Name must not be empty")]
    EmptyName,

    /// Output could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<marketplace_storefront::config::ConfigError> for CliError {
    fn from(e: marketplace_storefront::config::ConfigError) -> Self {
        Self::Storefront(e.into())
    }
}

impl From<marketplace_storefront::navigator::NavigationError> for CliError {
    fn from(e: marketplace_storefront::navigator::NavigationError) -> Self {
        Self::Storefront(e.into())
    }
}

/// Open the file-backed session store described by `config`.
///
/// The store is not hydrated yet.
pub fn open_store(config: &StorefrontConfig) -> SessionStore {
    let storage = FileStorage::new(&config.storage_dir);
    SessionStore::new(SessionPersistence::with_key(
        storage,
        config.session_key.clone(),
    ))
}
