//! In-process storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::StorefrontConfig;

use super::{Storage, StorageError};

/// Storage held in memory for the lifetime of the process.
///
/// Used by tests and by hosts that have no durable storage. An optional
/// byte quota (keys plus values) makes quota failures reproducible.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty storage without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes past `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Create an empty storage using the configured quota, if any.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        config
            .storage_quota_bytes
            .map_or_else(Self::new, Self::with_quota)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether the storage holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(poisoned)?;

        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("userState").unwrap(), None);

        storage.set_item("userState", "{}").unwrap();
        assert_eq!(storage.get_item("userState").unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("userState").unwrap();
        assert!(storage.is_empty());
        // Removing again is fine
        storage.remove_item("userState").unwrap();
    }

    #[test]
    fn test_quota_rejects_oversize_write() {
        let storage = MemoryStorage::with_quota(16);
        storage.set_item("k", "short").unwrap();

        let err = storage.set_item("k", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));

        // The previous value is untouched
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_from_config_applies_quota() {
        let unlimited = MemoryStorage::from_config(&StorefrontConfig::default());
        unlimited.set_item("userState", &"x".repeat(4096)).unwrap();

        let config = StorefrontConfig::default().with_storage_quota_bytes(Some(32));
        let limited = MemoryStorage::from_config(&config);
        let err = limited.set_item("userState", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 32, .. }));
    }

    #[test]
    fn test_quota_counts_replaced_entry_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        // Replacing the same key does not double count the old value
        storage.set_item("k", "987654321").unwrap();
    }
}
