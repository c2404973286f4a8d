//! Role representations
//!
//! A role lives either in the realm namespace or in exactly one client's
//! namespace. Composite roles pull other roles in, which is what makes a
//! principal's effective roles a superset of its assigned ones.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A realm or client role as returned by the management API.
///
/// The `id` is empty for roles that have not been created yet (for example a
/// payload passed to `create_realm_role`).
///
/// # Examples
///
/// ```
/// use admin_model::Role;
///
/// let role = Role::new("viewer").with_id("r-42").with_description("Read only");
/// assert_eq!(role.id, "r-42");
/// assert!(!role.composite);
/// assert!(!role.client_role);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique role identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Role name, unique within its container
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this role composes other roles
    #[serde(default)]
    pub composite: bool,

    /// Whether this role belongs to a client rather than the realm
    #[serde(default)]
    pub client_role: bool,

    /// Id of the realm or client that owns the role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,

    /// Custom role attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Vec<String>>,
}

impl Role {
    /// Creates a realm role payload with the given name and no id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: None,
            composite: false,
            client_role: false,
            container_id: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the role id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the role as composite.
    pub fn with_composite(mut self, composite: bool) -> Self {
        self.composite = composite;
        self
    }

    /// Marks the role as owned by the client with the given id.
    pub fn for_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_role = true;
        self.container_id = Some(client_id.into());
        self
    }
}
