//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_STORAGE_DIR` - Directory for durable session storage (default: `.marketplace`)
//! - `STOREFRONT_SESSION_KEY` - Storage key for the persisted session (default: `userState`)
//! - `STOREFRONT_LOGIN_PATH` - Where the role guard sends signed-out users (default: `/auth/login`)
//! - `STOREFRONT_ACCESS_DENIED_PATH` - Where the role guard sends users with the wrong role
//!   (default: `/access-denied`)
//! - `STOREFRONT_STORAGE_QUOTA_BYTES` - Byte quota for `MemoryStorage::from_config`

use std::path::PathBuf;

use thiserror::Error;

/// Default storage key for the persisted session.
pub const DEFAULT_SESSION_KEY: &str = "userState";

const DEFAULT_STORAGE_DIR: &str = ".marketplace";
const DEFAULT_LOGIN_PATH: &str = "/auth/login";
const DEFAULT_ACCESS_DENIED_PATH: &str = "/access-denied";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory backing `FileStorage`
    pub storage_dir: PathBuf,
    /// Key of the persisted session entry
    pub session_key: String,
    /// Redirect target for unauthenticated visitors
    pub login_path: String,
    /// Redirect target for role mismatches
    pub access_denied_path: String,
    /// Byte quota applied by `MemoryStorage::from_config`
    pub storage_quota_bytes: Option<usize>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            access_denied_path: DEFAULT_ACCESS_DENIED_PATH.to_string(),
            storage_quota_bytes: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a redirect path does not start with `/`,
    /// the session key is empty, or the quota is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("STOREFRONT_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);

        let session_key = lookup("STOREFRONT_SESSION_KEY").unwrap_or(defaults.session_key);
        if session_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_SESSION_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let login_path = lookup("STOREFRONT_LOGIN_PATH").unwrap_or(defaults.login_path);
        validate_path(&login_path, "STOREFRONT_LOGIN_PATH")?;

        let access_denied_path =
            lookup("STOREFRONT_ACCESS_DENIED_PATH").unwrap_or(defaults.access_denied_path);
        validate_path(&access_denied_path, "STOREFRONT_ACCESS_DENIED_PATH")?;

        let storage_quota_bytes = lookup("STOREFRONT_STORAGE_QUOTA_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STOREFRONT_STORAGE_QUOTA_BYTES".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            storage_dir,
            session_key,
            login_path,
            access_denied_path,
            storage_quota_bytes,
        })
    }

    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_access_denied_path(mut self, path: impl Into<String>) -> Self {
        self.access_denied_path = path.into();
        self
    }

    #[must_use]
    pub const fn with_storage_quota_bytes(mut self, quota: Option<usize>) -> Self {
        self.storage_quota_bytes = quota;
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Redirect targets are in-app locations and must be absolute paths.
fn validate_path(path: &str, var_name: &str) -> Result<(), ConfigError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must start with '/' (got {path:?})"),
        ))
    }
}
