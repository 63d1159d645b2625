//! Imperative navigation capability.
//!
//! The hosting framework owns the real router; the core only needs to be
//! able to replace the current location. [`MemoryRouter`] is an in-process
//! history used by the CLI host and by tests.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Navigation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The target is not an absolute in-app path.
    #[error("invalid navigation target: {0:?}")]
    InvalidPath(String),

    /// The router cannot navigate right now.
    #[error("navigation unavailable: {0}")]
    Unavailable(String),
}

/// Changes the current view location.
pub trait Navigator: Send + Sync {
    /// Replace the current location without adding a history entry, so
    /// back-navigation does not return to the page being left.
    ///
    /// # Errors
    ///
    /// Returns a [`NavigationError`] if the router rejects the target.
    fn navigate_replace(&self, path: &str) -> Result<(), NavigationError>;
}

impl<T: Navigator + ?Sized> Navigator for std::sync::Arc<T> {
    fn navigate_replace(&self, path: &str) -> Result<(), NavigationError> {
        (**self).navigate_replace(path)
    }
}

/// In-process browser-style history.
#[derive(Debug)]
pub struct MemoryRouter {
    entries: Mutex<Vec<String>>,
}

impl MemoryRouter {
    /// Start at `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidPath`] if `initial` is not absolute.
    pub fn new(initial: &str) -> Result<Self, NavigationError> {
        validate(initial)?;
        Ok(Self {
            entries: Mutex::new(vec![initial.to_owned()]),
        })
    }

    /// Current location.
    #[must_use]
    pub fn current(&self) -> String {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    /// Every entry in the history stack, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Navigate to `path`, adding a history entry.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidPath`] if `path` is not absolute.
    pub fn push(&self, path: &str) -> Result<(), NavigationError> {
        validate(path)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
        Ok(())
    }
}

impl Navigator for MemoryRouter {
    fn navigate_replace(&self, path: &str) -> Result<(), NavigationError> {
        validate(path)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.last_mut() {
            Some(last) => path.clone_into(last),
            None => entries.push(path.to_owned()),
        }
        tracing::debug!(path, "Location replaced");
        Ok(())
    }
}

fn validate(path: &str) -> Result<(), NavigationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(NavigationError::InvalidPath(path.to_owned()))
    }
}
