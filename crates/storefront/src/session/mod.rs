//! Session state, its persistence, and the store that owns it.
//!
//! # Data flow
//!
//! ```text
//! Storage ──load──▶ SessionPersistence ──hydrate──▶ SessionStore ──notify──▶ listeners
//!    ▲                                                  │
//!    └──────────────── save / clear ◀───────────────────┘
//! ```

mod model;
mod persistence;
mod store;

pub use model::{Hydration, LoadingStatus, PersistedSession, Session};
pub use persistence::SessionPersistence;
pub use store::{Listener, SessionStore, Subscription};
