//! Account role tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplace account role.
///
/// The backend issues upper-case tags. The known tags get their own variant;
/// anything else is kept verbatim in [`Role::Other`] so that a newer backend
/// never breaks session hydration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Places enquiries and orders.
    Buyer,
    /// Lists products and answers enquiries.
    Seller,
    /// Marketplace operator.
    Admin,
    /// Any tag this build does not know about.
    Other(String),
}

impl Role {
    /// The wire tag for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Buyer => "BUYER",
            Self::Seller => "SELLER",
            Self::Admin => "ADMIN",
            Self::Other(tag) => tag,
        }
    }

    /// Exact, case-sensitive comparison against a role tag.
    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        self.as_str() == tag
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(tag: &str) -> Self {
        match tag {
            "BUYER" => Self::Buyer,
            "SELLER" => Self::Seller,
            "ADMIN" => Self::Admin,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "BUYER" | "SELLER" | "ADMIN" => Self::from(tag.as_str()),
            _ => Self::Other(tag),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
