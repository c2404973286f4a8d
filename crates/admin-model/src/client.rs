//! Client representations
//!
//! Clients are the registered applications of a realm. Each one owns its own
//! role namespace.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered client (application) within a realm.
///
/// `id` is the server-generated unique id used in URLs; `client_id` is the
/// human-chosen identifier operators see.
///
/// # Examples
///
/// ```
/// use admin_model::Client;
///
/// let client = Client::new("account-console").with_id("5f1c");
/// assert_eq!(client.display_name(), "account-console");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique id assigned by the server
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Client identifier chosen at registration
    pub client_id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Protocol (e.g. "openid-connect", "saml")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Whether the client is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Whether the client is public (no secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_client: Option<bool>,

    /// Allowed redirect URIs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect_uris: Vec<String>,

    /// Protocol specific attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl Client {
    /// Creates a client payload with the given client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            client_id: client_id.into(),
            name: None,
            description: None,
            protocol: None,
            enabled: None,
            public_client: None,
            redirect_uris: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the server id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name shown in tables: the display name if set, otherwise the client id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.client_id)
    }
}
