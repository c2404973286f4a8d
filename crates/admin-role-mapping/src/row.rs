//! Rows of the role-mapping table
//!
//! A [`Row`] pairs a role with the scope it lives in. The scope is a tagged
//! variant, so a realm row can never be mistaken for a client row.

use admin_model::{Client, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace a role mapping lives in, identified by client unique id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "client_id")]
pub enum MappingScope {
    /// The realm's own roles
    Realm,
    /// Roles of the client with this unique id
    Client(String),
}

impl fmt::Display for MappingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingScope::Realm => f.write_str("realm"),
            MappingScope::Client(id) => write!(f, "client {}", id),
        }
    }
}

/// Scope of a row, carrying the full client for client rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "client")]
pub enum RowScope {
    /// Realm role
    Realm,
    /// Role of this client
    Client(Client),
}

impl RowScope {
    /// The scope key without the client details.
    pub fn mapping_scope(&self) -> MappingScope {
        match self {
            RowScope::Realm => MappingScope::Realm,
            RowScope::Client(client) => MappingScope::Client(client.id.clone()),
        }
    }
}

/// Identity of a row within one load: role id plus client id for client rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    /// Role id
    pub role_id: String,
    /// Client unique id, absent for realm rows
    pub client_id: Option<String>,
}

/// One displayable and assignable role mapping.
///
/// # Examples
///
/// ```
/// use admin_model::{Client, Role};
/// use admin_role_mapping::Row;
///
/// let realm = Row::realm(Role::new("admin").with_id("r-1"));
/// assert!(realm.is_realm());
///
/// let client = Client::new("app1").with_id("c-1");
/// let row = Row::for_client(Role::new("viewer").with_id("r-2"), client);
/// assert_eq!(row.client().map(|c| c.client_id.as_str()), Some("app1"));
/// assert_eq!(row.key().client_id.as_deref(), Some("c-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// The mapped role
    pub role: Role,

    /// Realm or client the role belongs to
    pub scope: RowScope,

    /// Held only through a composite role, not assigned directly
    #[serde(default)]
    pub inherited: bool,
}

impl Row {
    /// A directly assigned realm row.
    pub fn realm(role: Role) -> Self {
        Self {
            role,
            scope: RowScope::Realm,
            inherited: false,
        }
    }

    /// A directly assigned client row.
    pub fn for_client(role: Role, client: Client) -> Self {
        Self {
            role,
            scope: RowScope::Client(client),
            inherited: false,
        }
    }

    /// Mark the row as inherited.
    pub fn as_inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    /// Whether this is a realm row.
    pub fn is_realm(&self) -> bool {
        matches!(self.scope, RowScope::Realm)
    }

    /// Client of a client row.
    pub fn client(&self) -> Option<&Client> {
        match &self.scope {
            RowScope::Realm => None,
            RowScope::Client(client) => Some(client),
        }
    }

    /// Row identity within one load.
    pub fn key(&self) -> RowKey {
        RowKey {
            role_id: self.role.id.clone(),
            client_id: self.client().map(|client| client.id.clone()),
        }
    }
}
