//! Realm, client, group, user, role and client scope endpoints.

use crate::client::AdminClient;
use crate::error::AdminResult;
use admin_model::{Client, ClientScope, CreatedResource, Group, Realm, Role, User};
use tracing::{debug, instrument};

// Realms
impl AdminClient {
    /// Create a realm.
    #[instrument(skip(self, realm), fields(name = %realm.realm))]
    pub async fn create_realm(&self, realm: &Realm) -> AdminResult<()> {
        debug!("Creating realm");
        self.post_json(&self.config().url("/admin/realms"), realm)
            .await
    }

    /// Replace a realm's settings.
    #[instrument(skip(self, realm))]
    pub async fn update_realm(&self, name: &str, realm: &Realm) -> AdminResult<()> {
        self.put_json(&self.admin_url(name), realm).await
    }

    /// Fetch a realm.
    #[instrument(skip(self))]
    pub async fn get_realm(&self, name: &str) -> AdminResult<Realm> {
        self.get_json(&self.admin_url(name)).await
    }

    /// Delete a realm and everything in it.
    #[instrument(skip(self))]
    pub async fn delete_realm(&self, name: &str) -> AdminResult<()> {
        debug!("Deleting realm");
        self.delete(&self.admin_url(name)).await
    }
}

// Clients
impl AdminClient {
    /// All clients of the realm, in server order.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_clients(&self) -> AdminResult<Vec<Client>> {
        self.get_json(&self.realm_url("clients")).await
    }

    /// Clients whose `clientId` equals the given value.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn find_clients_by_client_id(&self, client_id: &str) -> AdminResult<Vec<Client>> {
        self.get_json_with_query(&self.realm_url("clients"), &[("clientId", client_id)])
            .await
    }

    /// Register a client.
    #[instrument(skip(self, client), fields(realm = %self.realm(), client_id = %client.client_id))]
    pub async fn create_client(&self, client: &Client) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url("clients"), client).await
    }

    /// Delete a client by its unique id.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn delete_client(&self, id: &str) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!("clients/{}", id))).await
    }

    /// Attach a client scope to a client as a default scope.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn add_default_client_scope(&self, client_id: &str, scope_id: &str) -> AdminResult<()> {
        self.put_empty(&self.realm_url(&format!(
            "clients/{}/default-client-scopes/{}",
            client_id, scope_id
        )))
        .await
    }

    /// Detach a default client scope from a client.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn remove_default_client_scope(
        &self,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!(
            "clients/{}/default-client-scopes/{}",
            client_id, scope_id
        )))
        .await
    }
}

// Groups
impl AdminClient {
    /// Top level groups of the realm.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_groups(&self) -> AdminResult<Vec<Group>> {
        self.get_json(&self.realm_url("groups")).await
    }

    /// Create a top level group.
    #[instrument(skip(self, group), fields(realm = %self.realm(), name = %group.name))]
    pub async fn create_group(&self, group: &Group) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url("groups"), group).await
    }

    /// Create a group as a child of `parent_id`.
    #[instrument(skip(self, group), fields(realm = %self.realm(), name = %group.name))]
    pub async fn create_child_group(
        &self,
        parent_id: &str,
        group: &Group,
    ) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url(&format!("groups/{}/children", parent_id)), group)
            .await
    }

    /// Delete a group and its children.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn delete_group(&self, id: &str) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!("groups/{}", id))).await
    }
}

// Users
impl AdminClient {
    /// Users whose username matches exactly.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn find_users_by_username(&self, username: &str) -> AdminResult<Vec<User>> {
        self.get_json_with_query(
            &self.realm_url("users"),
            &[("username", username), ("exact", "true")],
        )
        .await
    }

    /// Create a user.
    #[instrument(skip(self, user), fields(realm = %self.realm(), username = %user.username))]
    pub async fn create_user(&self, user: &User) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url("users"), user).await
    }

    /// Delete a user by id.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn delete_user(&self, id: &str) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!("users/{}", id))).await
    }

    /// Make a user a member of a group.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.put_empty(&self.realm_url(&format!("users/{}/groups/{}", user_id, group_id)))
            .await
    }

    /// The realm's user profile configuration, as raw JSON.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn get_user_profile(&self) -> AdminResult<serde_json::Value> {
        self.get_json(&self.realm_url("users/profile")).await
    }

    /// Replace the realm's user profile configuration.
    #[instrument(skip(self, profile), fields(realm = %self.realm()))]
    pub async fn update_user_profile(&self, profile: &serde_json::Value) -> AdminResult<()> {
        self.put_json(&self.realm_url("users/profile"), profile).await
    }
}

// Realm roles
impl AdminClient {
    /// Create a realm role. The returned id is the role name, which is how
    /// the server addresses realm roles.
    #[instrument(skip(self, role), fields(realm = %self.realm(), name = %role.name))]
    pub async fn create_realm_role(&self, role: &Role) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url("roles"), role).await
    }

    /// Fetch a realm role by name.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn get_realm_role(&self, name: &str) -> AdminResult<Role> {
        self.get_json(&self.realm_url(&format!("roles/{}", name))).await
    }

    /// Delete a realm role by name.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn delete_realm_role(&self, name: &str) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!("roles/{}", name))).await
    }
}

// Client scopes
impl AdminClient {
    /// All client scopes of the realm.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn list_client_scopes(&self) -> AdminResult<Vec<ClientScope>> {
        self.get_json(&self.realm_url("client-scopes")).await
    }

    /// The client scope with the given name, if any.
    pub async fn find_client_scope_by_name(&self, name: &str) -> AdminResult<Option<ClientScope>> {
        let scopes = self.list_client_scopes().await?;
        Ok(scopes.into_iter().find(|scope| scope.name == name))
    }

    /// Create a client scope.
    #[instrument(skip(self, scope), fields(realm = %self.realm(), name = %scope.name))]
    pub async fn create_client_scope(&self, scope: &ClientScope) -> AdminResult<CreatedResource> {
        self.post_created(&self.realm_url("client-scopes"), scope).await
    }

    /// Delete a client scope by id.
    #[instrument(skip(self), fields(realm = %self.realm()))]
    pub async fn delete_client_scope(&self, id: &str) -> AdminResult<()> {
        self.delete(&self.realm_url(&format!("client-scopes/{}", id))).await
    }
}
