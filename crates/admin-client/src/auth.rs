//! Admin token handling
//!
//! The management API is called with a bearer token obtained through the
//! resource-owner password grant. Tokens are kept until shortly before they
//! expire and then replaced by logging in again.

use crate::error::{AdminError, AdminResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a token is treated as stale.
const EXPIRY_SKEW_SECS: i64 = 10;

/// Token endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token to send as a bearer token
    pub access_token: String,

    /// Lifetime of the access token in seconds
    pub expires_in: i64,

    /// Refresh token, when the server issued one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Lifetime of the refresh token in seconds
    #[serde(default)]
    pub refresh_expires_in: i64,

    /// Token type (normally "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Granted scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Access token with its absolute expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Build from a token response received at `now`.
    ///
    /// Fails when `expires_in` does not fit in a timestamp.
    pub fn from_response(response: &TokenResponse, now: DateTime<Utc>) -> AdminResult<Self> {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AdminError::InvalidResponse(format!(
                    "token lifetime out of range: {}s",
                    response.expires_in
                ))
            })?;

        Ok(Self {
            value: response.access_token.clone(),
            expires_at,
        })
    }

    /// Whether the token is expired, or about to be, at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) >= self.expires_at
    }

    /// When the token expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
