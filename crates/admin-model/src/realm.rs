//! Realm representations

use serde::{Deserialize, Serialize};

/// A realm (tenant). Only the fields the console and fixtures touch are
/// modelled; anything else the server returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realm {
    /// Realm name, also used in URLs
    pub realm: String,

    /// Unique realm id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Whether the realm is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Human readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Whether self registration is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_allowed: Option<bool>,
}

impl Realm {
    /// Creates an enabled realm payload with the given name.
    pub fn new(realm: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            enabled: Some(true),
            ..Default::default()
        }
    }
}
