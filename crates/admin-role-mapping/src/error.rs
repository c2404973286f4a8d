//! Error types for role-mapping operations

use crate::row::MappingScope;
use crate::store::StoreError;
use thiserror::Error;

/// Role-mapping error types.
///
/// Store failures are wrapped with the scope they happened in; the original
/// error is kept as the source so callers can downcast it.
#[derive(Debug, Error)]
pub enum RoleMappingError {
    /// A read from the store failed
    #[error("Failed to load {scope} role mappings: {source}")]
    Fetch {
        /// Scope being read
        scope: MappingScope,
        /// Store error
        #[source]
        source: StoreError,
    },

    /// The client list could not be read
    #[error("Failed to list clients: {source}")]
    ClientList {
        /// Store error
        #[source]
        source: StoreError,
    },

    /// A write to the store failed
    #[error("Failed to assign {scope} role mappings: {source}")]
    Write {
        /// Scope being written
        scope: MappingScope,
        /// Store error
        #[source]
        source: StoreError,
    },

    /// No principal id was given
    #[error("Principal id must not be empty")]
    EmptyPrincipalId,
}

/// Result type for role-mapping operations.
pub type RoleMappingResult<T> = Result<T, RoleMappingError>;

impl RoleMappingError {
    pub(crate) fn fetch(scope: MappingScope) -> impl FnOnce(StoreError) -> Self {
        move |source| RoleMappingError::Fetch { scope, source }
    }

    pub(crate) fn write(scope: MappingScope) -> impl FnOnce(StoreError) -> Self {
        move |source| RoleMappingError::Write { scope, source }
    }

    /// Scope the failure belongs to, if it came from the store.
    pub fn scope(&self) -> Option<&MappingScope> {
        match self {
            RoleMappingError::Fetch { scope, .. } | RoleMappingError::Write { scope, .. } => {
                Some(scope)
            }
            RoleMappingError::ClientList { .. } | RoleMappingError::EmptyPrincipalId => None,
        }
    }

    /// The store's own error, if any.
    pub fn store_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            RoleMappingError::Fetch { source, .. }
            | RoleMappingError::ClientList { source }
            | RoleMappingError::Write { source, .. } => Some(source.as_ref()),
            RoleMappingError::EmptyPrincipalId => None,
        }
    }

    /// Whether this is a read failure.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            RoleMappingError::Fetch { .. } | RoleMappingError::ClientList { .. }
        )
    }

    /// Whether this is a write failure.
    pub fn is_write(&self) -> bool {
        matches!(self, RoleMappingError::Write { .. })
    }
}
