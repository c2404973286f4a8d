//! Error types for management API calls

use crate::config::ConfigError;
use thiserror::Error;

/// Admin client errors.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Requested resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A create call succeeded without telling us where the resource lives.
    #[error("Create response carried no Location header")]
    MissingLocation,

    /// Client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for admin client operations.
pub type AdminResult<T> = Result<T, AdminError>;

impl AdminError {
    /// Check if this error means the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::NotFound(_))
            || matches!(self, AdminError::ApiError { status: 404, .. })
    }

    /// HTTP status code behind this error, when there was a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdminError::ApiError { status, .. } => Some(*status),
            AdminError::NotFound(_) => Some(404),
            AdminError::AuthenticationFailed => Some(401),
            AdminError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            AdminError::InvalidResponse(_)
            | AdminError::MissingLocation
            | AdminError::Config(_) => None,
        }
    }

    /// Get error code for alerts and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::RequestFailed(_) => "REQUEST_FAILED",
            AdminError::ApiError { .. } => "API_ERROR",
            AdminError::NotFound(_) => "NOT_FOUND",
            AdminError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            AdminError::InvalidResponse(_) => "INVALID_RESPONSE",
            AdminError::MissingLocation => "MISSING_LOCATION",
            AdminError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(AdminError::NotFound("clients/x".to_string()).is_not_found());
        assert!(AdminError::ApiError {
            status: 404,
            message: "gone".to_string()
        }
        .is_not_found());
        assert!(!AdminError::AuthenticationFailed.is_not_found());
    }

    #[test]
    fn test_status_and_code() {
        let err = AdminError::ApiError {
            status: 409,
            message: "Conflict".to_string(),
        };
        assert_eq!(err.status_code(), Some(409));
        assert_eq!(err.error_code(), "API_ERROR");
        assert_eq!(err.to_string(), "API error (409): Conflict");

        assert_eq!(AdminError::MissingLocation.status_code(), None);
    }
}
