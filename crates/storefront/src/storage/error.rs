//! Storage error types.

use thiserror::Error;

/// Errors raised by [`Storage`](super::Storage) backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the backend's quota.
    #[error("storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// The key cannot be used with this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend is not usable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(err: &StorageError) -> &'static str {
        match err {
            StorageError::Io(_) => "io",
            StorageError::QuotaExceeded { .. } => "quota",
            StorageError::InvalidKey(_) => "key",
            StorageError::Unavailable(_) => "unavailable",
        }
    }

    #[test]
    fn test_every_variant_has_a_message() {
        let errors = [
            StorageError::from(std::io::Error::other("disk gone")),
            StorageError::QuotaExceeded {
                needed: 20,
                quota: 10,
            },
            StorageError::InvalidKey("../x".to_string()),
            StorageError::Unavailable("lock poisoned".to_string()),
        ];

        let kinds: Vec<&str> = errors.iter().map(kind).collect();
        assert_eq!(kinds, ["io", "quota", "key", "unavailable"]);

        let [io, quota, ..] = &errors;
        assert_eq!(io.to_string(), "storage I/O error: disk gone");
        assert_eq!(
            quota.to_string(),
            "storage quota exceeded: 20 bytes needed, quota is 10"
        );
    }
}
