//! Test-automation fixtures.
//!
//! Setup and teardown helpers for end-to-end suites that drive the console
//! against a live server. Every helper goes through [`AdminClient`], which
//! logs in on demand, so helpers can be called in any order.
//!
//! # Example
//!
//! ```rust,no_run
//! use admin_client::{AdminFixtures, AdminClient};
//! use admin_model::Realm;
//!
//! async fn setup() -> admin_client::AdminResult<()> {
//!     let fixtures = AdminFixtures::new(AdminClient::from_env()?);
//!     let realm = AdminFixtures::unique_name("e2e");
//!     fixtures.create_realm(&realm, None).await?;
//!     let groups = fixtures.in_realm(&realm).create_sub_groups(&["parent", "child"]).await?;
//!     assert_eq!(groups.len(), 2);
//!     fixtures.delete_realm(&realm).await
//! }
//! ```

use crate::auth::TokenResponse;
use crate::client::AdminClient;
use crate::error::{AdminError, AdminResult};
use admin_model::{Client, ClientScope, CreatedResource, Group, Realm, Role, User};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

/// Setup/teardown helper bound to one realm.
#[derive(Debug, Clone)]
pub struct AdminFixtures {
    client: AdminClient,
}

impl AdminFixtures {
    /// Wrap a client; realm-scoped helpers use the client's realm.
    pub fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Same helper addressing another realm.
    pub fn in_realm(&self, realm: &str) -> Self {
        Self::new(self.client.with_realm(realm))
    }

    /// Underlying client.
    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    /// A name that will not collide with earlier runs, e.g. `e2e-0190...`.
    pub fn unique_name(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::now_v7().simple())
    }

    /// Log in as a regular user.
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
        client_id: &str,
    ) -> AdminResult<TokenResponse> {
        self.client.login_user(username, password, client_id).await
    }

    /// Create a realm, starting from `payload` when given.
    #[instrument(skip(self, payload))]
    pub async fn create_realm(&self, realm: &str, payload: Option<Realm>) -> AdminResult<()> {
        let mut representation = payload.unwrap_or_else(|| Realm::new(realm));
        representation.realm = realm.to_string();
        self.client.create_realm(&representation).await?;
        info!("Created realm");
        Ok(())
    }

    /// Update a realm's settings.
    pub async fn update_realm(&self, realm: &str, payload: &Realm) -> AdminResult<()> {
        self.client.update_realm(realm, payload).await
    }

    /// Delete a realm.
    #[instrument(skip(self))]
    pub async fn delete_realm(&self, realm: &str) -> AdminResult<()> {
        self.client.delete_realm(realm).await?;
        info!("Deleted realm");
        Ok(())
    }

    /// Register a client.
    pub async fn create_client(&self, client: &Client) -> AdminResult<CreatedResource> {
        self.client.create_client(client).await
    }

    /// Delete the client registered under `client_id`.
    #[instrument(skip(self))]
    pub async fn delete_client(&self, client_id: &str) -> AdminResult<()> {
        let client = self.find_client(client_id).await?;
        self.client.delete_client(&client.id).await
    }

    /// Create a top level group.
    pub async fn create_group(&self, name: &str) -> AdminResult<CreatedResource> {
        self.client.create_group(&Group::new(name)).await
    }

    /// Create a chain of groups, each one the child of the previous.
    #[instrument(skip(self))]
    pub async fn create_sub_groups(&self, names: &[&str]) -> AdminResult<Vec<CreatedResource>> {
        let mut created: Vec<CreatedResource> = Vec::with_capacity(names.len());

        for name in names {
            let group = Group::new(*name);
            let next = match created.last() {
                None => self.client.create_group(&group).await?,
                Some(parent) => self.client.create_child_group(&parent.id, &group).await?,
            };
            created.push(next);
        }

        Ok(created)
    }

    /// Delete every top level group (children go with their parents).
    #[instrument(skip(self))]
    pub async fn delete_groups(&self) -> AdminResult<()> {
        let groups = self.client.list_groups().await?;
        for group in &groups {
            self.client.delete_group(&group.id).await?;
        }
        info!(count = groups.len(), "Deleted groups");
        Ok(())
    }

    /// Create a user.
    pub async fn create_user(&self, user: &User) -> AdminResult<CreatedResource> {
        self.client.create_user(user).await
    }

    /// Make a user a member of a group.
    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.client.add_user_to_group(user_id, group_id).await
    }

    /// Create an enabled user and put it in a group.
    #[instrument(skip(self))]
    pub async fn create_user_in_group(
        &self,
        username: &str,
        group_id: &str,
    ) -> AdminResult<CreatedResource> {
        let user = self.client.create_user(&User::new(username)).await?;
        self.client.add_user_to_group(&user.id, group_id).await?;
        Ok(user)
    }

    /// Delete the user with the given username.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> AdminResult<()> {
        let user = self
            .client
            .find_users_by_username(username)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AdminError::NotFound(format!("user {}", username)))?;
        self.client.delete_user(&user.id).await
    }

    /// Create a client scope.
    pub async fn create_client_scope(&self, scope: &ClientScope) -> AdminResult<CreatedResource> {
        self.client.create_client_scope(scope).await
    }

    /// Delete the client scope with the given name.
    #[instrument(skip(self))]
    pub async fn delete_client_scope(&self, name: &str) -> AdminResult<()> {
        let scope = self.find_client_scope(name).await?;
        self.client.delete_client_scope(&scope.id).await
    }

    /// Whether a client scope with the given name exists.
    pub async fn exists_client_scope(&self, name: &str) -> AdminResult<bool> {
        Ok(self.client.find_client_scope_by_name(name).await?.is_some())
    }

    /// Add a client scope to a client's default scopes, both looked up by name.
    #[instrument(skip(self))]
    pub async fn add_default_client_scope_in_client(
        &self,
        scope_name: &str,
        client_id: &str,
    ) -> AdminResult<()> {
        let scope = self.find_client_scope(scope_name).await?;
        let client = self.find_client(client_id).await?;
        self.client
            .add_default_client_scope(&client.id, &scope.id)
            .await
    }

    /// Remove a client scope from a client's default scopes.
    #[instrument(skip(self))]
    pub async fn remove_default_client_scope_in_client(
        &self,
        scope_name: &str,
        client_id: &str,
    ) -> AdminResult<()> {
        let scope = self.find_client_scope(scope_name).await?;
        let client = self.find_client(client_id).await?;
        self.client
            .remove_default_client_scope(&client.id, &scope.id)
            .await
    }

    /// Deep-merge `patch` into `realm`'s current user profile and store it.
    #[instrument(skip(self, patch))]
    pub async fn patch_user_profile(&self, realm: &str, patch: Value) -> AdminResult<()> {
        let client = self.client.with_realm(realm);
        let mut profile = client.get_user_profile().await?;
        merge_json(&mut profile, patch);
        client.update_user_profile(&profile).await
    }

    /// Create a realm role.
    pub async fn create_realm_role(&self, role: &Role) -> AdminResult<CreatedResource> {
        self.client.create_realm_role(role).await
    }

    /// Delete a realm role by name.
    pub async fn delete_realm_role(&self, name: &str) -> AdminResult<()> {
        self.client.delete_realm_role(name).await
    }

    async fn find_client(&self, client_id: &str) -> AdminResult<Client> {
        self.client
            .find_clients_by_client_id(client_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AdminError::NotFound(format!("client {}", client_id)))
    }

    async fn find_client_scope(&self, name: &str) -> AdminResult<ClientScope> {
        self.client
            .find_client_scope_by_name(name)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("client scope {}", name)))
    }
}

/// Recursively merge `patch` into `target`.
///
/// Objects merge key by key and arrays merge index by index; any other patch
/// value replaces the target value.
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(patch)) => {
            for (index, value) in patch.into_iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => merge_json(existing, value),
                    None => target.push(value),
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
