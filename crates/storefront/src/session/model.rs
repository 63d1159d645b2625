//! Session state types.

use marketplace_core::{AccessToken, Profile, RefreshToken};
use serde::{Deserialize, Serialize};

/// Whether an auth operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingStatus {
    #[default]
    Idle,
    Pending,
}

/// Whether the persisted snapshot has been read into memory yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    #[default]
    Pending,
    Complete,
}

/// Authentication state of the current user.
///
/// There is no stored "authenticated" flag: [`Session::is_authenticated`]
/// is computed from the access token, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub profile: Option<Profile>,
    pub access_token: Option<AccessToken>,
    pub refresh_token: Option<RefreshToken>,
    pub loading: LoadingStatus,
    pub error: Option<String>,
    pub hydration: Hydration,
}

impl Session {
    /// True iff an access token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The authenticated flag, or `None` while hydration is still pending.
    #[must_use]
    pub const fn authenticated(&self) -> Option<bool> {
        match self.hydration {
            Hydration::Pending => None,
            Hydration::Complete => Some(self.is_authenticated()),
        }
    }

    /// The fields that survive a reload.
    #[must_use]
    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            profile: self.profile.clone(),
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }

    /// Drop every identity field.
    pub(crate) fn clear_identity(&mut self) {
        self.profile = None;
        self.access_token = None;
        self.refresh_token = None;
    }
}

/// The persisted subset of a [`Session`]: `{profile, accessToken, refreshToken}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub access_token: Option<AccessToken>,
    #[serde(default)]
    pub refresh_token: Option<RefreshToken>,
}

impl PersistedSession {
    /// Whether there is nothing worth restoring.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.profile.is_none() && self.access_token.is_none() && self.refresh_token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_unknown_until_hydrated() {
        let mut session = Session::default();
        assert_eq!(session.authenticated(), None);
        assert!(!session.is_authenticated());

        session.hydration = Hydration::Complete;
        assert_eq!(session.authenticated(), Some(false));
    }

    #[test]
    fn test_authenticated_follows_access_token() {
        let mut session = Session {
            hydration: Hydration::Complete,
            access_token: Some(AccessToken::new("a")),
            ..Session::default()
        };
        assert_eq!(session.authenticated(), Some(true));

        session.clear_identity();
        assert_eq!(session.authenticated(), Some(false));
        assert!(session.persisted().is_empty());
    }
}
