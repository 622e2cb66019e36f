//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod audit;
mod permission;
mod role;

pub use access::{
    AccessGuard, GuardDecision, PermissionGuard, any_role_grants, effective_permissions,
    has_permission,
};
pub use audit::AuditAction;
pub use permission::{
    Permission, PermissionAction, PermissionCatalog, PermissionCategory, ROLE_ASSIGN,
    ROLE_MANAGE, ROLE_READ, WILDCARD_PERMISSION,
};
pub use role::{
    ROLE_DESCRIPTION_MIN_LENGTH, ROLE_NAME_MIN_LENGTH, Role, RoleDraft, RoleFieldErrors, RoleId,
    RolePatch, RolePermissions, RoleRecord,
};
