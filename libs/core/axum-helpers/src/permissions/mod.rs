//! Viewer capabilities attached to each request.
//!
//! Authentication happens upstream. This module only carries the resulting
//! grant: [`attach_permissions`] resolves a [`PermissionSet`] per request from
//! a [`PermissionSource`] and stores it in the request extensions, where
//! handlers pick it up with the [`PermissionSet`] extractor.

mod middleware;

pub use middleware::attach_permissions;

use axum::{extract::FromRequestParts, http::HeaderName, http::request::Parts};
use core_config::{ConfigError, FromEnv, env_list, env_optional};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;

/// A named capability such as `MANAGE_USERS`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The capabilities granted to the current viewer.
///
/// Extracting it never fails: a request without a grant has the empty set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list, ignoring blanks.
    pub fn parse_list(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Permission::new)
            .collect()
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.0.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S> FromRequestParts<S> for PermissionSet
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<PermissionSet>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Where a request's permissions come from.
#[derive(Clone, Debug)]
pub enum PermissionSource {
    /// Every request receives the same grant.
    Static(PermissionSet),
    /// A trusted upstream proxy forwards the viewer's grant in a header.
    /// Requests without the header receive `fallback`.
    Header {
        name: HeaderName,
        fallback: PermissionSet,
    },
}

/// Permission settings read from the environment.
///
/// - `PERMISSIONS_HEADER`: optional trusted header name
/// - `GRANTED_PERMISSIONS`: comma-separated static grant (default empty)
#[derive(Clone, Debug, Default)]
pub struct PermissionConfig {
    pub header: Option<String>,
    pub granted: Vec<String>,
}

impl PermissionConfig {
    pub fn source(&self) -> Result<PermissionSource, ConfigError> {
        let granted: PermissionSet = self.granted.iter().cloned().map(Permission::new).collect();

        match &self.header {
            Some(header) => {
                let name = HeaderName::try_from(header.as_str()).map_err(|e| {
                    ConfigError::ParseError {
                        key: "PERMISSIONS_HEADER".to_string(),
                        details: e.to_string(),
                    }
                })?;
                Ok(PermissionSource::Header {
                    name,
                    fallback: granted,
                })
            }
            None => Ok(PermissionSource::Static(granted)),
        }
    }
}

impl FromEnv for PermissionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            header: env_optional("PERMISSIONS_HEADER"),
            granted: env_list("GRANTED_PERMISSIONS"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANAGE_USERS: Permission = Permission::from_static("MANAGE_USERS");

    #[test]
    fn parse_list_ignores_blanks() {
        let set = PermissionSet::parse_list(" MANAGE_USERS, ,VIEW_REPORTS,");
        assert!(set.contains(&MANAGE_USERS));
        assert!(set.contains(&Permission::new("VIEW_REPORTS")));
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn static_and_owned_permissions_compare_equal() {
        assert_eq!(MANAGE_USERS, Permission::new("MANAGE_USERS"));
        assert_eq!(MANAGE_USERS.to_string(), "MANAGE_USERS");
    }

    #[test]
    fn config_defaults_to_empty_static_grant() {
        temp_env::with_vars(
            [
                ("PERMISSIONS_HEADER", None::<&str>),
                ("GRANTED_PERMISSIONS", None::<&str>),
            ],
            || {
                let source = PermissionConfig::from_env().unwrap().source().unwrap();
                match source {
                    PermissionSource::Static(set) => assert!(set.is_empty()),
                    other => panic!("unexpected source: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn config_with_header_uses_header_source() {
        temp_env::with_vars(
            [
                ("PERMISSIONS_HEADER", Some("x-forwarded-permissions")),
                ("GRANTED_PERMISSIONS", Some("MANAGE_USERS")),
            ],
            || {
                let source = PermissionConfig::from_env().unwrap().source().unwrap();
                match source {
                    PermissionSource::Header { name, fallback } => {
                        assert_eq!(name.as_str(), "x-forwarded-permissions");
                        assert!(fallback.contains(&MANAGE_USERS));
                    }
                    other => panic!("unexpected source: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn config_rejects_invalid_header_name() {
        let config = PermissionConfig {
            header: Some("not a header".to_string()),
            granted: vec![],
        };
        let err = config.source().unwrap_err();
        assert!(err.to_string().contains("PERMISSIONS_HEADER"));
    }
}
