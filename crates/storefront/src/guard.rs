//! Role-based route protection.
//!
//! A [`RoleGuard`] wraps a protected layout. Once mounted it watches the
//! [`SessionStore`] and settles into exactly one terminal outcome:
//!
//! ```text
//!                ┌──▶ LoginRedirect   (signed out)
//!   Verifying ───┼──▶ DeniedRedirect  (signed in, other role)
//!                └──▶ Verified        (signed in, expected role)
//! ```
//!
//! While the session is still settling (not hydrated yet, or a token without
//! a profile) the guard stays in `Verifying` and the layout shows its loading
//! indicator. Protected content is only produced in `Verified`.

use std::sync::{Arc, Mutex, PoisonError};

use marketplace_core::Profile;

use crate::config::StorefrontConfig;
use crate::navigator::Navigator;
use crate::session::{Session, SessionStore, Subscription};

/// Per-mount guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Waiting for the session to settle; loading indicator shown.
    Verifying,
    /// Sent to the login page. Terminal.
    LoginRedirect,
    /// Sent to the access-denied page. Terminal.
    DeniedRedirect,
    /// Children are rendered. Terminal.
    Verified,
}

impl GuardState {
    /// Whether no further transition can happen for this mount.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Verifying)
    }
}

/// What the layout should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outlet<T> {
    /// Loading indicator; children are withheld.
    Loading,
    /// The protected children.
    Content(T),
}

/// The parts of a session the guard decides on.
#[derive(Debug, Clone, Copy)]
pub struct AuthView<'a> {
    /// `None` while the flag is not yet known.
    pub authenticated: Option<bool>,
    pub profile: Option<&'a Profile>,
}

impl<'a> From<&'a Session> for AuthView<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            authenticated: session.authenticated(),
            profile: session.profile.as_ref(),
        }
    }
}

/// Decide where a guard in `Verifying` should go next.
///
/// A signed-out flag always wins, even if a stale profile is still around,
/// so an inconsistent session never renders protected content.
#[must_use]
pub fn evaluate(view: AuthView<'_>, expected_role: &str) -> GuardState {
    match (view.authenticated, view.profile) {
        (Some(false), _) => GuardState::LoginRedirect,
        (Some(true), Some(profile)) if profile.role.matches(expected_role) => GuardState::Verified,
        (Some(true), Some(_)) => GuardState::DeniedRedirect,
        (Some(true), None) | (None, _) => GuardState::Verifying,
    }
}

/// Redirect targets used by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    pub login: String,
    pub access_denied: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self::from(&StorefrontConfig::default())
    }
}

impl From<&StorefrontConfig> for GuardPaths {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            login: config.login_path.clone(),
            access_denied: config.access_denied_path.clone(),
        }
    }
}

/// Guard configuration for one protected layout.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    expected_role: String,
    paths: GuardPaths,
}

impl RoleGuard {
    /// Guard a layout for `expected_role` (compared by exact tag).
    #[must_use]
    pub fn new(expected_role: impl Into<String>) -> Self {
        Self {
            expected_role: expected_role.into(),
            paths: GuardPaths::default(),
        }
    }

    #[must_use]
    pub fn with_paths(mut self, paths: GuardPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Role tag this guard admits.
    #[must_use]
    pub fn expected_role(&self) -> &str {
        &self.expected_role
    }

    /// Mount the guard: subscribe to `store` and evaluate the current session.
    pub fn mount<N: Navigator + 'static>(&self, store: &SessionStore, navigator: N) -> MountedGuard {
        let core = Arc::new(GuardCore {
            expected_role: self.expected_role.clone(),
            paths: self.paths.clone(),
            navigator: Arc::new(navigator),
            state: Mutex::new(GuardState::Verifying),
        });

        // Subscribe before the first evaluation so no change can slip between them
        let listener = Arc::clone(&core);
        let subscription = store.subscribe(move |session| listener.on_session(session));
        core.on_session(&store.snapshot());

        MountedGuard {
            core,
            _subscription: subscription,
        }
    }
}

/// A mounted guard. Dropping it unmounts and unsubscribes.
#[derive(Debug)]
pub struct MountedGuard {
    core: Arc<GuardCore>,
    _subscription: Subscription,
}

impl MountedGuard {
    /// Current state of this mount.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.core.state()
    }

    /// Produce the protected children only once verified.
    ///
    /// `Verified` is terminal for this mount, so the children keep rendering
    /// after a later sign-out. Hosts must drop this guard and mount a new one
    /// when the session signs out.
    pub fn render<T>(&self, children: impl FnOnce() -> T) -> Outlet<T> {
        match self.state() {
            GuardState::Verified => Outlet::Content(children()),
            GuardState::Verifying | GuardState::LoginRedirect | GuardState::DeniedRedirect => {
                Outlet::Loading
            }
        }
    }

    /// Unmount now.
    pub fn unmount(self) {
        drop(self);
    }
}

struct GuardCore {
    expected_role: String,
    paths: GuardPaths,
    navigator: Arc<dyn Navigator>,
    state: Mutex<GuardState>,
}

impl std::fmt::Debug for GuardCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardCore")
            .field("expected_role", &self.expected_role)
            .field("paths", &self.paths)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl GuardCore {
    fn state(&self) -> GuardState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_session(&self, session: &Session) {
        let next = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.is_terminal() {
                return;
            }
            let next = evaluate(AuthView::from(session), &self.expected_role);
            // Claim the transition before navigating so a re-entrant
            // notification cannot navigate a second time.
            *state = next;
            next
        };

        let target = match next {
            GuardState::Verifying => {
                tracing::debug!(expected_role = %self.expected_role, "Session not settled yet");
                return;
            }
            GuardState::Verified => {
                tracing::debug!(expected_role = %self.expected_role, "Access verified");
                return;
            }
            GuardState::LoginRedirect => {
                tracing::info!(
                    expected_role = %self.expected_role,
                    target = %self.paths.login,
                    "Not signed in, redirecting to login"
                );
                &self.paths.login
            }
            GuardState::DeniedRedirect => {
                tracing::info!(
                    expected_role = %self.expected_role,
                    actual_role = session.profile.as_ref().map(|p| p.role.as_str()),
                    target = %self.paths.access_denied,
                    "Role mismatch, redirecting to access denied"
                );
                &self.paths.access_denied
            }
        };

        if let Err(e) = self.navigator.navigate_replace(target) {
            tracing::warn!(error = %e, target = %target, "Guard redirect failed, staying on loading view");
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = GuardState::Verifying;
        }
    }
}
