//! Account profile as delivered by the login and signup endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Email, Role, UserId};

/// Account status flags.
///
/// Older backends omit some or all of these, so every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountFlags {
    /// Account is enabled.
    pub is_active: bool,
    /// Account has been blocked by an operator.
    pub is_blocked: bool,
    /// Account has been soft-deleted.
    pub is_deleted: bool,
}

impl Default for AccountFlags {
    fn default() -> Self {
        Self {
            is_active: true,
            is_blocked: false,
            is_deleted: false,
        }
    }
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub account_flags: AccountFlags,
    pub username: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "id": "64f1c0a9",
            "name": "Acme Traders",
            "email": "ops@acme.example",
            "role": "SELLER",
            "createdAt": "2024-03-01T09:30:00Z",
            "username": "acme"
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role, Role::Seller);
        assert_eq!(profile.phone_number, None);
        assert!(!profile.is_verified);
        assert_eq!(profile.account_flags, AccountFlags::default());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let profile = Profile {
            id: UserId::new("u1"),
            name: "Buyer One".to_string(),
            email: Email::parse("one@buyer.example").unwrap(),
            phone_number: Some("+91 98765 43210".to_string()),
            role: Role::Buyer,
            is_verified: true,
            created_at: "2024-03-01T09:30:00Z".parse().unwrap(),
            account_flags: AccountFlags::default(),
            username: "buyer1".to_string(),
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["phoneNumber"], "+91 98765 43210");
        assert_eq!(value["isVerified"], true);
        assert_eq!(value["accountFlags"]["isActive"], true);
        assert_eq!(value["role"], "BUYER");
    }
}
