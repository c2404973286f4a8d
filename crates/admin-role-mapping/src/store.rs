//! Role store abstraction
//!
//! The engine reads and writes role mappings only through this trait. The
//! identity store is the sole shared resource; implementations are expected
//! to be safe to call concurrently and to report their own failures.

use admin_model::{Client, Role};
use async_trait::async_trait;

/// Error raised by a store, passed through the engine untouched.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write access to one principal kind's role mappings.
///
/// `client_id` arguments are a client's unique id ([`Client::id`]).
#[async_trait]
pub trait RoleMappingStore: Send + Sync {
    /// Realm roles directly assigned to the principal.
    async fn list_realm_role_mappings(&self, principal_id: &str) -> StoreResult<Vec<Role>>;

    /// Realm roles the principal holds directly or through composites.
    async fn list_composite_realm_role_mappings(&self, principal_id: &str)
        -> StoreResult<Vec<Role>>;

    /// All clients of the realm, in a stable order.
    async fn list_clients(&self) -> StoreResult<Vec<Client>>;

    /// Roles of one client directly assigned to the principal.
    async fn list_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>>;

    /// Roles of one client the principal holds directly or through composites.
    async fn list_composite_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>>;

    /// Assign realm roles in one batch.
    async fn add_realm_role_mappings(&self, principal_id: &str, roles: &[Role]) -> StoreResult<()>;

    /// Assign roles of one client in one batch.
    async fn add_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> StoreResult<()>;
}
