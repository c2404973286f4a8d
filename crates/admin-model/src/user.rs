//! User representations

use serde::{Deserialize, Serialize};

/// A user account within a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user id
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Login name
    pub username: String,

    /// Whether the account is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether the email address has been verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl User {
    /// Creates an enabled user payload with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            enabled: Some(true),
            email: None,
            email_verified: None,
            first_name: None,
            last_name: None,
        }
    }
}
