//! Durable key/value storage backends.
//!
//! [`Storage`] mirrors the browser's key/value storage: string keys, string
//! values, synchronous calls. The session persistence adapter is the only
//! consumer in this crate; it treats every [`StorageError`] as recoverable.

mod error;
mod file;
mod memory;

use std::sync::Arc;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Synchronous string key/value storage.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be modified.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
