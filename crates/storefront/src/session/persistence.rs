//! Best-effort persistence of the session snapshot.
//!
//! Persistence must never be the reason the UI fails: every storage or
//! parse failure is logged here and swallowed. A caller that reads back
//! nothing simply continues as a signed-out visitor.

use crate::config::DEFAULT_SESSION_KEY;
use crate::storage::Storage;

use super::model::PersistedSession;

/// Reads and writes the persisted session entry in a [`Storage`] backend.
#[derive(Debug)]
pub struct SessionPersistence<S> {
    storage: S,
    key: String,
}

impl<S: Storage> SessionPersistence<S> {
    /// Persist under the default `userState` key.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    /// Persist under a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key of the persisted entry.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Erase the backend type so the adapter can live in a non-generic owner.
    #[must_use]
    pub fn into_dyn(self) -> SessionPersistence<Box<dyn Storage>>
    where
        S: 'static,
    {
        SessionPersistence {
            storage: Box::new(self.storage),
            key: self.key,
        }
    }

    /// Write `{profile, accessToken, refreshToken}` to storage.
    pub fn save(&self, snapshot: &PersistedSession) {
        let json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Failed to encode session snapshot");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, &json) {
            tracing::warn!(error = %e, key = %self.key, "Failed to persist session");
        }
    }

    /// Read the persisted snapshot, or the empty snapshot if there is none
    /// or it cannot be read.
    #[must_use]
    pub fn load(&self) -> PersistedSession {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedSession::default(),
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Failed to read persisted session");
                return PersistedSession::default();
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Discarding malformed persisted session");
                PersistedSession::default()
            }
        }
    }

    /// Remove the persisted entry.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::debug!(error = %e, key = %self.key, "Failed to remove persisted session");
        }
    }
}
