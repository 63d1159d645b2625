//! Opaque bearer tokens issued at login.
//!
//! Tokens are kept in a [`SecretString`] so they never show up in `Debug`
//! output or logs. They serialize as plain strings because the persisted
//! session has to carry them across reloads.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! define_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name(SecretString);

        impl $name {
            /// Wrap a raw token string.
            #[must_use]
            pub fn new(token: impl Into<String>) -> Self {
                Self(SecretString::from(token.into()))
            }

            /// Access the raw token, e.g. for an `Authorization` header.
            #[must_use]
            pub fn expose(&self) -> &str {
                self.0.expose_secret()
            }
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                Self::new(self.expose())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.expose() == other.expose()
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&"[REDACTED]").finish()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.expose())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

define_token!(
    /// Short-lived token sent with authenticated API calls.
    AccessToken
);

define_token!(
    /// Long-lived token exchanged for a fresh access token.
    RefreshToken
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = AccessToken::new("eyJhbGciOi.secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let token = RefreshToken::new("r-123");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"r-123\"");
        let parsed: RefreshToken = serde_json::from_str("\"r-123\"").unwrap();
        assert_eq!(parsed, token);
    }
}
