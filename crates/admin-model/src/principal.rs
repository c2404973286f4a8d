//! Principals that can hold role mappings
//!
//! Groups and users expose the same role-mapping endpoints, so the role
//! mapping engine works against a [`Principal`] and only the URL segment
//! differs between the two kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of principal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// A group; members inherit its mappings
    Group,
    /// A single user
    User,
}

impl PrincipalKind {
    /// Collection segment used in management API paths.
    pub fn path_segment(&self) -> &'static str {
        match self {
            PrincipalKind::Group => "groups",
            PrincipalKind::User => "users",
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::Group => "group",
            PrincipalKind::User => "user",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group or user whose role mappings are being viewed or edited.
///
/// # Examples
///
/// ```
/// use admin_model::{Principal, PrincipalKind};
///
/// let user = Principal::user("u-1", "jdoe");
/// assert_eq!(user.kind.path_segment(), "users");
/// assert_eq!(user.to_string(), "user jdoe (u-1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Group or user
    pub kind: PrincipalKind,

    /// Opaque id assigned by the server
    pub id: String,

    /// Display name (group name or username)
    pub name: String,
}

impl Principal {
    /// Creates a group principal.
    pub fn group(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: PrincipalKind::Group,
            id: id.into(),
            name: name.into(),
        }
    }

    /// Creates a user principal.
    pub fn user(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: PrincipalKind::User,
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.name, self.id)
    }
}

/// Id of a resource created through the management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    /// Id read from the `Location` header of the create response
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_kinds() {
        let group = Principal::group("g-1", "Admins");
        assert_eq!(group.kind.path_segment(), "groups");
        assert_eq!(group.to_string(), "group Admins (g-1)");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&PrincipalKind::User).unwrap();
        assert_eq!(json, "\"user\"");
    }
}
