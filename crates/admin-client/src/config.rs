//! Admin client configuration.
//!
//! Provides the server location, the realm used to authenticate, the realm
//! being administered and the admin credentials. Configuration is loaded from
//! environment variables with defaults suited to a local development server.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required setting.
    #[error("Missing required setting: {0}")]
    Missing(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for the management API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Base URL of the identity server (e.g., "https://sso.example.com").
    pub server_url: String,

    /// Realm the admin account authenticates against.
    pub auth_realm: String,

    /// Realm being administered.
    pub realm: String,

    /// Client used for the password grant.
    pub client_id: String,

    /// Admin username.
    pub username: String,

    /// Admin password.
    pub password: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,
}

impl Default for AdminConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8180".to_string(),
            auth_realm: "master".to_string(),
            realm: "master".to_string(),
            client_id: "admin-cli".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            timeout_secs: 30,
            verify_tls: true,
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("server_url", &self.server_url)
            .field("auth_realm", &self.auth_realm)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ADMIN_SERVER_URL`: Server base URL (default: http://localhost:8180)
    /// - `ADMIN_AUTH_REALM`: Realm to authenticate against (default: master)
    /// - `ADMIN_REALM`: Realm to administer (default: master)
    /// - `ADMIN_CLIENT_ID`: Client for the password grant (default: admin-cli)
    /// - `ADMIN_USERNAME`: Admin username (default: admin)
    /// - `ADMIN_PASSWORD`: Admin password (default: admin)
    /// - `ADMIN_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `ADMIN_VERIFY_TLS`: Whether to verify TLS (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            server_url: std::env::var("ADMIN_SERVER_URL").unwrap_or(default.server_url),
            auth_realm: std::env::var("ADMIN_AUTH_REALM").unwrap_or(default.auth_realm),
            realm: std::env::var("ADMIN_REALM").unwrap_or(default.realm),
            client_id: std::env::var("ADMIN_CLIENT_ID").unwrap_or(default.client_id),
            username: std::env::var("ADMIN_USERNAME").unwrap_or(default.username),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or(default.password),
            timeout_secs: std::env::var("ADMIN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            verify_tls: std::env::var("ADMIN_VERIFY_TLS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.verify_tls),
        }
    }

    /// Point the configuration at a server, keeping everything else.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Administer a different realm.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a full URL by appending a path to the server URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.server_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Token endpoint of the authentication realm.
    pub fn token_url(&self) -> String {
        self.url(&format!(
            "/realms/{}/protocol/openid-connect/token",
            self.auth_realm
        ))
    }

    /// Validate that the configuration can be used to reach a server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("ADMIN_SERVER_URL", &self.server_url),
            ("ADMIN_AUTH_REALM", &self.auth_realm),
            ("ADMIN_REALM", &self.realm),
            ("ADMIN_CLIENT_ID", &self.client_id),
            ("ADMIN_USERNAME", &self.username),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key.to_string()));
            }
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "ADMIN_SERVER_URL".to_string(),
                message: format!("expected an http(s) URL, got {}", self.server_url),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ADMIN_TIMEOUT_SECS".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.auth_realm, "master");
        assert_eq!(config.client_id, "admin-cli");
        assert!(config.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_joining() {
        let config = AdminConfig::default().with_server_url("https://sso.example.com/");
        assert_eq!(
            config.url("/admin/realms"),
            "https://sso.example.com/admin/realms"
        );
        assert_eq!(
            config.token_url(),
            "https://sso.example.com/realms/master/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AdminConfig::default().with_server_url("");
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));

        let config = AdminConfig::default().with_server_url("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let config = AdminConfig {
            timeout_secs: 0,
            ..AdminConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = AdminConfig {
            password: "hunter2".to_string(),
            ..AdminConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
