//! Capability gate for the admin pages.

use axum_helpers::{Permission, PermissionSet};

/// Required to see and use the user management page.
pub const MANAGE_USERS: Permission = Permission::from_static("MANAGE_USERS");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authorized,
    Denied,
}

impl Access {
    pub fn check(permissions: &PermissionSet, required: &Permission) -> Self {
        if permissions.contains(required) {
            Access::Authorized
        } else {
            Access::Denied
        }
    }

    pub fn is_authorized(self) -> bool {
        self == Access::Authorized
    }
}

/// Produce `content` when authorised, `fallback` otherwise. Only the chosen
/// branch runs.
pub fn gate<T>(access: Access, content: impl FnOnce() -> T, fallback: impl FnOnce() -> T) -> T {
    match access {
        Access::Authorized => content(),
        Access::Denied => fallback(),
    }
}

/// [`gate`] on whether `permissions` holds `required`.
pub fn with_permission<T>(
    permissions: &PermissionSet,
    required: &Permission,
    content: impl FnOnce() -> T,
    fallback: impl FnOnce() -> T,
) -> T {
    gate(Access::check(permissions, required), content, fallback)
}
