//! Role store backed by the management REST API.

use crate::store::{RoleMappingStore, StoreResult};
use admin_client::AdminClient;
use admin_model::{Client, Principal, PrincipalKind, Role};
use async_trait::async_trait;

/// [`RoleMappingStore`] for the groups or the users of the client's realm.
///
/// Store errors are [`admin_client::AdminError`]s and can be downcast from
/// [`RoleMappingError::store_error`](crate::RoleMappingError::store_error).
#[derive(Debug, Clone)]
pub struct AdminRoleStore {
    client: AdminClient,
    kind: PrincipalKind,
}

impl AdminRoleStore {
    /// Create a store for one principal kind.
    pub fn new(client: AdminClient, kind: PrincipalKind) -> Self {
        Self { client, kind }
    }

    /// Store for group role mappings.
    pub fn groups(client: AdminClient) -> Self {
        Self::new(client, PrincipalKind::Group)
    }

    /// Store for user role mappings.
    pub fn users(client: AdminClient) -> Self {
        Self::new(client, PrincipalKind::User)
    }

    /// Store matching the principal's kind.
    pub fn for_principal(client: AdminClient, principal: &Principal) -> Self {
        Self::new(client, principal.kind)
    }

    /// Principal kind addressed by this store.
    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }
}

#[async_trait]
impl RoleMappingStore for AdminRoleStore {
    async fn list_realm_role_mappings(&self, principal_id: &str) -> StoreResult<Vec<Role>> {
        Ok(self
            .client
            .list_realm_role_mappings(self.kind, principal_id)
            .await?)
    }

    async fn list_composite_realm_role_mappings(
        &self,
        principal_id: &str,
    ) -> StoreResult<Vec<Role>> {
        Ok(self
            .client
            .list_composite_realm_role_mappings(self.kind, principal_id)
            .await?)
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        Ok(self.client.list_clients().await?)
    }

    async fn list_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>> {
        Ok(self
            .client
            .list_client_role_mappings(self.kind, principal_id, client_id)
            .await?)
    }

    async fn list_composite_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>> {
        Ok(self
            .client
            .list_composite_client_role_mappings(self.kind, principal_id, client_id)
            .await?)
    }

    async fn add_realm_role_mappings(&self, principal_id: &str, roles: &[Role]) -> StoreResult<()> {
        Ok(self
            .client
            .add_realm_role_mappings(self.kind, principal_id, roles)
            .await?)
    }

    async fn add_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> StoreResult<()> {
        Ok(self
            .client
            .add_client_role_mappings(self.kind, principal_id, client_id, roles)
            .await?)
    }
}
