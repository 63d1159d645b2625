//! Protected dashboard layouts.
//!
//! Each dashboard section is a layout that mounts a [`RoleGuard`] for one
//! role. Public pages (landing, categories, login) have no layout entry.

use marketplace_core::Role;

use crate::guard::{GuardPaths, RoleGuard};

/// A path prefix served by a role-specific dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedLayout {
    pub prefix: String,
    pub role: String,
    pub home: String,
}

impl ProtectedLayout {
    #[must_use]
    pub fn new(prefix: impl Into<String>, role: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let home = format!("{}/dashboard", prefix.trim_end_matches('/'));
        Self {
            prefix,
            role: role.into(),
            home,
        }
    }

    /// Segment-aware prefix match: `/seller` covers `/seller/enquiries`
    /// but not `/sellers`.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        let prefix = self.prefix.trim_end_matches('/');
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }

    /// Guard for this layout.
    #[must_use]
    pub fn guard(&self, paths: GuardPaths) -> RoleGuard {
        RoleGuard::new(self.role.clone()).with_paths(paths)
    }
}

/// The set of role-specific dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayouts {
    layouts: Vec<ProtectedLayout>,
}

impl Default for DashboardLayouts {
    fn default() -> Self {
        Self::new(vec![
            ProtectedLayout::new("/buyer", Role::Buyer.as_str()),
            ProtectedLayout::new("/seller", Role::Seller.as_str()),
            ProtectedLayout::new("/admin", Role::Admin.as_str()),
        ])
    }
}

impl DashboardLayouts {
    #[must_use]
    pub const fn new(layouts: Vec<ProtectedLayout>) -> Self {
        Self { layouts }
    }

    /// Layout serving `path`, longest prefix first.
    #[must_use]
    pub fn layout_for(&self, path: &str) -> Option<&ProtectedLayout> {
        self.layouts
            .iter()
            .filter(|layout| layout.covers(path))
            .max_by_key(|layout| layout.prefix.len())
    }

    /// Role required to view `path`, or `None` for a public page.
    #[must_use]
    pub fn required_role(&self, path: &str) -> Option<&str> {
        self.layout_for(path).map(|layout| layout.role.as_str())
    }

    /// Dashboard landing page for `role`, used after sign-in.
    #[must_use]
    pub fn home_for(&self, role: &Role) -> Option<&str> {
        self.layouts
            .iter()
            .find(|layout| role.matches(&layout.role))
            .map(|layout| layout.home.as_str())
    }
}
