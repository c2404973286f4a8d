//! Role mapping endpoints.
//!
//! Groups and users share the same role-mapping resource layout:
//!
//! ```text
//! {principal}/role-mappings/realm                      GET, POST
//! {principal}/role-mappings/realm/composite            GET
//! {principal}/role-mappings/clients/{client}           GET, POST
//! {principal}/role-mappings/clients/{client}/composite GET
//! ```
//!
//! `composite` variants return the effective roles (assigned plus everything
//! reachable through composite roles). `{client}` is the client's unique id,
//! not its `clientId`.

use crate::client::AdminClient;
use crate::error::AdminResult;
use admin_model::{PrincipalKind, Role};
use tracing::{debug, instrument};

impl AdminClient {
    fn role_mappings_url(&self, kind: PrincipalKind, principal_id: &str, suffix: &str) -> String {
        self.realm_url(&format!(
            "{}/{}/role-mappings/{}",
            kind.path_segment(),
            principal_id,
            suffix
        ))
    }

    /// Realm roles directly assigned to a group or user.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_realm_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
    ) -> AdminResult<Vec<Role>> {
        debug!("Listing realm role mappings");
        self.get_json(&self.role_mappings_url(kind, principal_id, "realm"))
            .await
    }

    /// Effective realm roles of a group or user.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_composite_realm_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
    ) -> AdminResult<Vec<Role>> {
        debug!("Listing effective realm role mappings");
        self.get_json(&self.role_mappings_url(kind, principal_id, "realm/composite"))
            .await
    }

    /// Roles of one client directly assigned to a group or user.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_client_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
        client_unique_id: &str,
    ) -> AdminResult<Vec<Role>> {
        debug!("Listing client role mappings");
        let suffix = format!("clients/{}", client_unique_id);
        self.get_json(&self.role_mappings_url(kind, principal_id, &suffix))
            .await
    }

    /// Effective roles of one client for a group or user.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_composite_client_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
        client_unique_id: &str,
    ) -> AdminResult<Vec<Role>> {
        debug!("Listing effective client role mappings");
        let suffix = format!("clients/{}/composite", client_unique_id);
        self.get_json(&self.role_mappings_url(kind, principal_id, &suffix))
            .await
    }

    /// Assign realm roles to a group or user in one batch.
    #[instrument(skip(self, roles), fields(realm = %self.realm(), count = roles.len()))]
    pub async fn add_realm_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        debug!("Adding realm role mappings");
        self.post_json(&self.role_mappings_url(kind, principal_id, "realm"), roles)
            .await
    }

    /// Assign roles of one client to a group or user in one batch.
    #[instrument(skip(self, roles), fields(realm = %self.realm(), count = roles.len()))]
    pub async fn add_client_role_mappings(
        &self,
        kind: PrincipalKind,
        principal_id: &str,
        client_unique_id: &str,
        roles: &[Role],
    ) -> AdminResult<()> {
        debug!("Adding client role mappings");
        let suffix = format!("clients/{}", client_unique_id);
        self.post_json(&self.role_mappings_url(kind, principal_id, &suffix), roles)
            .await
    }
}
