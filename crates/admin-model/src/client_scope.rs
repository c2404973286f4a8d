//! Client scope representations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A client scope: a reusable bundle of protocol mappers and role scope
/// mappings that clients can include by default or on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientScope {
    /// Unique scope id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Scope name
    pub name: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Protocol (e.g. "openid-connect")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Scope attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl ClientScope {
    /// Creates an OpenID Connect scope payload with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: None,
            protocol: Some("openid-connect".to_string()),
            attributes: HashMap::new(),
        }
    }
}
