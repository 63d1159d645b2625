//! Open a page through the dashboard role guards.
//!
//! # Usage
//!
//! ```bash
//! mkt-cli visit /seller/enquiries
//! mkt-cli visit /buyer/addresses
//! ```

use std::fmt;
use std::sync::Arc;

use marketplace_storefront::StorefrontConfig;
use marketplace_storefront::guard::{GuardPaths, GuardState, Outlet};
use marketplace_storefront::layouts::DashboardLayouts;
use marketplace_storefront::navigator::MemoryRouter;

use super::{CliError, open_store};

/// Where a visit ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Public page, no guard involved.
    Public(String),
    /// Protected page rendered for the signed-in user.
    Rendered { path: String, role: String },
    /// The guard replaced the location.
    Redirected { from: String, to: String },
    /// The session never settled; the loading view is still showing.
    Verifying(String),
}

impl fmt::Display for VisitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public(path) => write!(f, "{path}: public page"),
            Self::Rendered { path, role } => write!(f, "{path}: rendered for {role}"),
            Self::Redirected { from, to } => write!(f, "{from}: redirected to {to}"),
            Self::Verifying(path) => write!(f, "{path}: still verifying session"),
        }
    }
}

/// Hydrate the persisted session and open `path`.
///
/// # Errors
///
/// Returns an error if `path` is not an absolute in-app path.
pub fn visit(config: &StorefrontConfig, path: &str) -> Result<VisitOutcome, CliError> {
    let router = Arc::new(MemoryRouter::new(path)?);
    let layouts = DashboardLayouts::default();

    let Some(layout) = layouts.layout_for(path) else {
        return Ok(VisitOutcome::Public(path.to_owned()));
    };

    let store = open_store(config);
    store.hydrate();

    let guard = layout
        .guard(GuardPaths::from(config))
        .mount(&store, Arc::clone(&router));

    let outcome = match guard.render(|| path.to_owned()) {
        Outlet::Content(path) => VisitOutcome::Rendered {
            path,
            role: layout.role.clone(),
        },
        Outlet::Loading => match guard.state() {
            GuardState::LoginRedirect | GuardState::DeniedRedirect => VisitOutcome::Redirected {
                from: path.to_owned(),
                to: router.current(),
            },
            GuardState::Verifying | GuardState::Verified => {
                VisitOutcome::Verifying(path.to_owned())
            }
        },
    };

    Ok(outcome)
}
