//! Dev sign-in, sign-out and profile lookup.
//!
//! # Usage
//!
//! ```bash
//! mkt-cli login -e ops@acme.example -n "Acme Traders" -r SELLER
//! mkt-cli whoami
//! mkt-cli logout
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_STORAGE_DIR` - Where the session file lives
//! - `STOREFRONT_SESSION_KEY` - Name of the session entry

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use marketplace_core::{
    AccessToken, AccountFlags, Email, Profile, RefreshToken, Role, UserId,
};
use marketplace_storefront::StorefrontConfig;
use marketplace_storefront::layouts::DashboardLayouts;
use rand::RngCore;

use super::{CliError, open_store};

/// Input for a dev sign-in.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
    pub role: String,
    pub username: Option<String>,
    pub phone: Option<String>,
}

/// Sign in with random dev tokens, standing in for the login endpoint.
///
/// # Returns
///
/// The dashboard landing page for the new session's role, if there is one.
///
/// # Errors
///
/// Returns an error for an invalid email or an empty name. The failure is
/// also recorded on the session, which signs out any previous user.
pub fn login(config: &StorefrontConfig, request: LoginRequest) -> Result<Option<String>, CliError> {
    let store = open_store(config);
    store.hydrate();
    store.begin_auth();

    let email = match Email::parse(&request.email) {
        Ok(email) => email,
        Err(e) => {
            store.auth_failed(e.to_string());
            return Err(CliError::InvalidEmail(format!("{}: {e}", request.email)));
        }
    };

    let name = request.name.trim();
    if name.is_empty() {
        store.auth_failed(CliError::EmptyName.to_string());
        return Err(CliError::EmptyName);
    }

    let username = request.username.unwrap_or_else(|| {
        email
            .as_str()
            .split_once('@')
            .map_or_else(|| email.to_string(), |(mailbox, _)| mailbox.to_owned())
    });
    let role = Role::from(request.role);

    let profile = Profile {
        id: UserId::new(uuid::Uuid::new_v4().simple().to_string()),
        name: name.to_owned(),
        email,
        phone_number: request.phone,
        role: role.clone(),
        is_verified: true,
        created_at: Utc::now(),
        account_flags: AccountFlags::default(),
        username,
    };

    tracing::info!(email = %profile.email, role = %role, "Dev login");
    store.auth_succeeded(
        profile,
        AccessToken::new(dev_token()),
        RefreshToken::new(dev_token()),
    );

    Ok(DashboardLayouts::default()
        .home_for(&role)
        .map(str::to_owned))
}

/// Sign out and remove the persisted session.
pub fn logout(config: &StorefrontConfig) {
    let store = open_store(config);
    store.hydrate();
    store.logout();
}

/// Profile of the persisted signed-in session, if any.
#[must_use]
pub fn whoami(config: &StorefrontConfig) -> Option<Profile> {
    let store = open_store(config);
    store.hydrate();
    let session = store.snapshot();
    if session.is_authenticated() {
        session.profile
    } else {
        None
    }
}

/// 256-bit random token, base64url encoded.
fn dev_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
