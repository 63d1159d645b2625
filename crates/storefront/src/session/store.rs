//! The session store.
//!
//! The store is the only owner of [`Session`] state. Callers perform login,
//! signup and refresh requests themselves and report the outcome through the
//! operations below; the store never touches the network.
//!
//! Every mutation runs in three steps: update the in-memory session, apply
//! the persistence side effect, then notify subscribers with a snapshot.
//! Subscribers run after the internal locks are released, so a listener may
//! call back into the store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use marketplace_core::{AccessToken, Profile, RefreshToken};

use crate::storage::Storage;

use super::model::{Hydration, LoadingStatus, Session};
use super::persistence::SessionPersistence;

/// Observer invoked with the new session after every change.
pub type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

/// Persistence side effect requested by a mutation.
enum Persist {
    Nothing,
    Save,
    Clear,
}

/// Shared, cheaply cloneable session store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<Session>,
    persistence: SessionPersistence<Box<dyn Storage>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.snapshot())
            .field("key", &self.inner.persistence.key())
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an empty, not yet hydrated store.
    #[must_use]
    pub fn new<S: Storage + 'static>(persistence: SessionPersistence<S>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Session::default()),
                persistence: persistence.into_dyn(),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Clone of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the persisted snapshot into memory.
    ///
    /// Runs once; later calls (or calls after an auth outcome has already
    /// settled the session) are ignored. A snapshot without an access token
    /// is treated as signed out and its leftovers are removed from storage.
    pub fn hydrate(&self) {
        if self.snapshot().hydration == Hydration::Complete {
            tracing::debug!("Session already hydrated, skipping");
            return;
        }

        let restored = self.inner.persistence.load();

        self.update(|session| {
            if session.hydration == Hydration::Complete {
                return Persist::Nothing;
            }
            session.hydration = Hydration::Complete;

            if restored.access_token.is_none() {
                session.clear_identity();
                if restored.is_empty() {
                    tracing::debug!("No persisted session found");
                    return Persist::Nothing;
                }
                tracing::warn!("Persisted session has no access token, discarding it");
                return Persist::Clear;
            }

            tracing::info!(
                user_id = restored.profile.as_ref().map(|p| p.id.as_str()),
                has_profile = restored.profile.is_some(),
                "Session restored from storage"
            );
            session.profile = restored.profile;
            session.access_token = restored.access_token;
            session.refresh_token = restored.refresh_token;
            Persist::Nothing
        });
    }

    /// Mark an auth request as in flight and clear the last error.
    pub fn begin_auth(&self) {
        self.update(|session| {
            session.loading = LoadingStatus::Pending;
            session.error = None;
            Persist::Nothing
        });
    }

    /// Record a successful login or signup and persist it.
    pub fn auth_succeeded(
        &self,
        profile: Profile,
        access_token: AccessToken,
        refresh_token: RefreshToken,
    ) {
        tracing::info!(user_id = %profile.id, role = %profile.role, "Authentication succeeded");

        self.update(|session| {
            session.profile = Some(profile);
            session.access_token = Some(access_token);
            session.refresh_token = Some(refresh_token);
            session.loading = LoadingStatus::Idle;
            session.error = None;
            session.hydration = Hydration::Complete;
            Persist::Save
        });
    }

    /// Record a failed auth request: drop the identity and keep the message.
    pub fn auth_failed(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(error = %message, "Authentication failed");

        self.update(|session| {
            session.clear_identity();
            session.loading = LoadingStatus::Idle;
            session.error = Some(message);
            session.hydration = Hydration::Complete;
            Persist::Clear
        });
    }

    /// Sign out: drop the identity and the persisted copy.
    pub fn logout(&self) {
        tracing::info!("Logging out");

        self.update(|session| {
            session.clear_identity();
            session.loading = LoadingStatus::Idle;
            session.error = None;
            session.hydration = Hydration::Complete;
            Persist::Clear
        });
    }

    /// Attach a freshly fetched profile to the current signed-in session.
    ///
    /// Ignored when there is no access token.
    pub fn profile_loaded(&self, profile: Profile) {
        self.update(|session| {
            if !session.is_authenticated() {
                tracing::warn!(user_id = %profile.id, "Ignoring profile for signed-out session");
                return Persist::Nothing;
            }
            session.profile = Some(profile);
            Persist::Save
        });
    }

    /// Replace the tokens after a refresh-token exchange.
    ///
    /// Ignored when there is no access token.
    pub fn tokens_refreshed(&self, access_token: AccessToken, refresh_token: RefreshToken) {
        self.update(|session| {
            if !session.is_authenticated() {
                tracing::warn!("Ignoring refreshed tokens for signed-out session");
                return Persist::Nothing;
            }
            session.access_token = Some(access_token);
            session.refresh_token = Some(refresh_token);
            Persist::Save
        });
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register `listener` to be called after every session change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        tracing::debug!(listener_id = id, "Session listener registered");

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn update(&self, mutate: impl FnOnce(&mut Session) -> Persist) {
        let changed = {
            let mut session = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let before = session.clone();

            match mutate(&mut session) {
                Persist::Nothing => {}
                Persist::Save => self.inner.persistence.save(&session.persisted()),
                Persist::Clear => self.inner.persistence.clear(),
            }

            (*session != before).then(|| session.clone())
        };

        if let Some(session) = changed {
            self.notify(&session);
        }
    }

    fn notify(&self, session: &Session) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(session);
        }
    }
}

/// Handle for a registered listener. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
            tracing::debug!(listener_id = self.id, "Session listener removed");
        }
    }
}
