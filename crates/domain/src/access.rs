use crate::permission::{Permission, PermissionCatalog};
use crate::role::Role;

/// Returns whether a single role grants the permission.
///
/// Wildcard roles grant every id, including ids the catalog does not know yet.
#[must_use]
pub fn has_permission(role: &Role, permission_id: &str) -> bool {
    role.permissions().grants(permission_id)
}

/// Returns whether any of the roles grants the permission.
#[must_use]
pub fn any_role_grants<'a>(
    roles: impl IntoIterator<Item = &'a Role>,
    permission_id: &str,
) -> bool {
    roles
        .into_iter()
        .any(|role| has_permission(role, permission_id))
}

/// Returns catalog permissions granted by the union of the roles.
#[must_use]
pub fn effective_permissions<'c>(
    roles: &[Role],
    catalog: &'c PermissionCatalog,
) -> Vec<&'c Permission> {
    catalog
        .list_permissions()
        .iter()
        .filter(|permission| any_role_grants(roles, permission.id()))
        .collect()
}

/// Resolved roles of one user, answering allow/deny queries synchronously.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessGuard {
    roles: Vec<Role>,
}

impl AccessGuard {
    /// Creates a guard over the user's resolved roles.
    #[must_use]
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Returns the resolved roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        self.roles.as_slice()
    }

    /// Returns whether any held role grants the permission.
    #[must_use]
    pub fn allows(&self, permission_id: &str) -> bool {
        any_role_grants(&self.roles, permission_id)
    }

    /// Returns whether the user holds a wildcard role.
    #[must_use]
    pub fn has_full_access(&self) -> bool {
        self.roles
            .iter()
            .any(|role| role.permissions().is_wildcard())
    }

    /// Returns catalog permissions the user holds.
    #[must_use]
    pub fn effective_permissions<'c>(&self, catalog: &'c PermissionCatalog) -> Vec<&'c Permission> {
        effective_permissions(&self.roles, catalog)
    }
}

/// Outcome of evaluating a [`PermissionGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected content.
    Protected,
    /// Render the fallback, or nothing.
    Fallback,
}

/// Declarative gate around a protected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGuard {
    required: String,
}

impl PermissionGuard {
    /// Creates a guard requiring one permission id.
    #[must_use]
    pub fn new(required: impl Into<String>) -> Self {
        Self {
            required: required.into(),
        }
    }

    /// Returns the required permission id.
    #[must_use]
    pub fn required(&self) -> &str {
        self.required.as_str()
    }

    /// Decides which branch to render for the given roles.
    #[must_use]
    pub fn decide(&self, roles: &[Role]) -> GuardDecision {
        if any_role_grants(roles, &self.required) {
            GuardDecision::Protected
        } else {
            GuardDecision::Fallback
        }
    }

    /// Renders `content` when allowed, otherwise `fallback`.
    pub fn render<T>(
        &self,
        roles: &[Role],
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        match self.decide(roles) {
            GuardDecision::Protected => Some(content()),
            GuardDecision::Fallback => fallback(),
        }
    }

    /// Renders `content` when allowed, otherwise nothing.
    pub fn render_or_nothing<T>(&self, roles: &[Role], content: impl FnOnce() -> T) -> Option<T> {
        self.render(roles, content, || None)
    }
}
