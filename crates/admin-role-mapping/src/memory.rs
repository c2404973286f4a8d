//! In-memory role store
//!
//! Keeps realm roles, clients, client roles, composite links and principal
//! mappings in process. Effective roles are computed by expanding composites
//! the way the identity server does. Every write call is logged and any
//! operation can be made to fail, which is what the engine's tests use.

use crate::store::{RoleMappingStore, StoreResult};
use admin_model::{Client, Role};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;

/// Store operations, used to target injected faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    ListRealmRoleMappings,
    ListCompositeRealmRoleMappings,
    ListClients,
    ListClientRoleMappings,
    ListCompositeClientRoleMappings,
    AddRealmRoleMappings,
    AddClientRoleMappings,
}

impl StoreOperation {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOperation::ListRealmRoleMappings => "list_realm_role_mappings",
            StoreOperation::ListCompositeRealmRoleMappings => "list_composite_realm_role_mappings",
            StoreOperation::ListClients => "list_clients",
            StoreOperation::ListClientRoleMappings => "list_client_role_mappings",
            StoreOperation::ListCompositeClientRoleMappings => {
                "list_composite_client_role_mappings"
            }
            StoreOperation::AddRealmRoleMappings => "add_realm_role_mappings",
            StoreOperation::AddClientRoleMappings => "add_client_role_mappings",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory store error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// Principal was never registered
    #[error("Principal not found: {0}")]
    UnknownPrincipal(String),

    /// Client was never registered
    #[error("Client not found: {0}")]
    UnknownClient(String),

    /// Role does not exist in the targeted scope
    #[error("Role not found: {0}")]
    UnknownRole(String),

    /// Failure injected with `fail_on`
    #[error("Injected failure in {operation}")]
    Injected {
        /// Operation that failed
        operation: StoreOperation,
    },
}

/// A write call received by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCall {
    Realm {
        principal_id: String,
        role_ids: Vec<String>,
    },
    Client {
        principal_id: String,
        client_id: String,
        role_ids: Vec<String>,
    },
}

#[derive(Debug, Clone)]
struct Fault {
    operation: StoreOperation,
    client_id: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    /// All roles by id
    roles: HashMap<String, Role>,
    /// Realm role ids in registration order
    realm_roles: Vec<String>,
    clients: Vec<Client>,
    /// Role ids per client unique id
    client_roles: HashMap<String, Vec<String>>,
    /// Composite role id -> child role ids
    composites: HashMap<String, Vec<String>>,
    /// Principal id -> directly assigned role ids, in assignment order
    mappings: HashMap<String, Vec<String>>,
    writes: Vec<WriteCall>,
    reads: usize,
}

impl State {
    fn assigned(&self, principal_id: &str) -> Result<&[String], MemoryStoreError> {
        self.mappings
            .get(principal_id)
            .map(Vec::as_slice)
            .ok_or_else(|| MemoryStoreError::UnknownPrincipal(principal_id.to_string()))
    }

    fn check_client(&self, client_id: &str) -> Result<(), MemoryStoreError> {
        if self.clients.iter().any(|c| c.id == client_id) {
            Ok(())
        } else {
            Err(MemoryStoreError::UnknownClient(client_id.to_string()))
        }
    }

    fn in_scope(role: &Role, client_id: Option<&str>) -> bool {
        match client_id {
            None => !role.client_role,
            Some(id) => role.client_role && role.container_id.as_deref() == Some(id),
        }
    }

    /// Roles of the scope among the given ids, in order.
    fn scoped(&self, ids: &[String], client_id: Option<&str>) -> Vec<Role> {
        ids.iter()
            .filter_map(|id| self.roles.get(id))
            .filter(|role| Self::in_scope(role, client_id))
            .cloned()
            .collect()
    }

    /// Assigned roles plus everything reachable through composites.
    fn expand(&self, assigned: &[String]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = assigned.iter().map(String::as_str).collect();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id.to_string());
            if let Some(children) = self.composites.get(id) {
                queue.extend(children.iter().map(String::as_str));
            }
        }

        order
    }

    fn list(
        &self,
        principal_id: &str,
        client_id: Option<&str>,
        composite: bool,
    ) -> Result<Vec<Role>, MemoryStoreError> {
        if let Some(id) = client_id {
            self.check_client(id)?;
        }
        let assigned = self.assigned(principal_id)?;
        if composite {
            Ok(self.scoped(&self.expand(assigned), client_id))
        } else {
            Ok(self.scoped(assigned, client_id))
        }
    }

    fn add(
        &mut self,
        principal_id: &str,
        client_id: Option<&str>,
        roles: &[Role],
    ) -> Result<(), MemoryStoreError> {
        if let Some(id) = client_id {
            self.check_client(id)?;
        }
        self.assigned(principal_id)?;
        for role in roles {
            let known = self
                .roles
                .get(&role.id)
                .map(|r| Self::in_scope(r, client_id))
                .unwrap_or(false);
            if !known {
                return Err(MemoryStoreError::UnknownRole(role.id.clone()));
            }
        }

        let mapped = self.mappings.entry(principal_id.to_string()).or_default();
        for role in roles {
            if !mapped.contains(&role.id) {
                mapped.push(role.id.clone());
            }
        }
        Ok(())
    }
}

/// In-memory [`RoleMappingStore`].
///
/// # Examples
///
/// ```
/// use admin_model::Role;
/// use admin_role_mapping::MemoryRoleStore;
///
/// let store = MemoryRoleStore::new()
///     .with_realm_role(Role::new("admin").with_id("r-admin"), &["r-base"])
///     .with_realm_role(Role::new("base").with_id("r-base"), &[])
///     .with_principal("g-1")
///     .with_mapping("g-1", "r-admin");
/// ```
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    state: RwLock<State>,
    faults: Vec<Fault>,
}

impl MemoryRoleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a realm role and the ids of the roles it composes.
    pub fn with_realm_role(mut self, role: Role, composites: &[&str]) -> Self {
        let state = self.state.get_mut();
        let mut role = role;
        role.client_role = false;
        role.container_id = None;
        state.realm_roles.push(role.id.clone());
        Self::register(state, role, composites);
        self
    }

    /// Register a client.
    pub fn with_client(mut self, client: Client) -> Self {
        let state = self.state.get_mut();
        state.client_roles.entry(client.id.clone()).or_default();
        state.clients.push(client);
        self
    }

    /// Register a role of a client and the ids of the roles it composes.
    pub fn with_client_role(mut self, client_id: &str, role: Role, composites: &[&str]) -> Self {
        let state = self.state.get_mut();
        state
            .client_roles
            .entry(client_id.to_string())
            .or_default()
            .push(role.id.clone());
        Self::register(state, role.for_client(client_id), composites);
        self
    }

    /// Register a principal with no mappings.
    pub fn with_principal(mut self, principal_id: &str) -> Self {
        self.state
            .get_mut()
            .mappings
            .entry(principal_id.to_string())
            .or_default();
        self
    }

    /// Assign a role directly to a principal.
    pub fn with_mapping(mut self, principal_id: &str, role_id: &str) -> Self {
        let mapped = self
            .state
            .get_mut()
            .mappings
            .entry(principal_id.to_string())
            .or_default();
        if !mapped.iter().any(|id| id == role_id) {
            mapped.push(role_id.to_string());
        }
        self
    }

    /// Make every call of an operation fail.
    pub fn fail_on(mut self, operation: StoreOperation) -> Self {
        self.faults.push(Fault {
            operation,
            client_id: None,
        });
        self
    }

    /// Make an operation fail only for one client.
    pub fn fail_on_client(mut self, operation: StoreOperation, client_id: &str) -> Self {
        self.faults.push(Fault {
            operation,
            client_id: Some(client_id.to_string()),
        });
        self
    }

    /// Write calls received so far, in arrival order, failed ones included.
    pub async fn writes(&self) -> Vec<WriteCall> {
        self.state.read().await.writes.clone()
    }

    /// Number of read calls received so far.
    pub async fn read_count(&self) -> usize {
        self.state.read().await.reads
    }

    /// Role ids directly assigned to a principal.
    pub async fn assigned_role_ids(&self, principal_id: &str) -> Vec<String> {
        self.state
            .read()
            .await
            .mappings
            .get(principal_id)
            .cloned()
            .unwrap_or_default()
    }

    fn register(state: &mut State, role: Role, composites: &[&str]) {
        if !composites.is_empty() {
            state.composites.insert(
                role.id.clone(),
                composites.iter().map(|id| id.to_string()).collect(),
            );
        }
        state.roles.insert(role.id.clone(), role);
    }

    fn check_fault(
        &self,
        operation: StoreOperation,
        client_id: Option<&str>,
    ) -> Result<(), MemoryStoreError> {
        let hit = self.faults.iter().any(|fault| {
            fault.operation == operation
                && (fault.client_id.is_none() || fault.client_id.as_deref() == client_id)
        });
        if hit {
            Err(MemoryStoreError::Injected { operation })
        } else {
            Ok(())
        }
    }

    async fn read(
        &self,
        operation: StoreOperation,
        principal_id: &str,
        client_id: Option<&str>,
        composite: bool,
    ) -> StoreResult<Vec<Role>> {
        let mut state = self.state.write().await;
        state.reads += 1;
        self.check_fault(operation, client_id)?;
        Ok(state.list(principal_id, client_id, composite)?)
    }

    async fn write(
        &self,
        operation: StoreOperation,
        principal_id: &str,
        client_id: Option<&str>,
        roles: &[Role],
    ) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let principal_id_owned = principal_id.to_string();
        let role_ids = roles.iter().map(|role| role.id.clone()).collect();
        state.writes.push(match client_id {
            None => WriteCall::Realm {
                principal_id: principal_id_owned,
                role_ids,
            },
            Some(id) => WriteCall::Client {
                principal_id: principal_id_owned,
                client_id: id.to_string(),
                role_ids,
            },
        });
        self.check_fault(operation, client_id)?;
        Ok(state.add(principal_id, client_id, roles)?)
    }
}

#[async_trait]
impl RoleMappingStore for MemoryRoleStore {
    async fn list_realm_role_mappings(&self, principal_id: &str) -> StoreResult<Vec<Role>> {
        self.read(StoreOperation::ListRealmRoleMappings, principal_id, None, false)
            .await
    }

    async fn list_composite_realm_role_mappings(
        &self,
        principal_id: &str,
    ) -> StoreResult<Vec<Role>> {
        self.read(
            StoreOperation::ListCompositeRealmRoleMappings,
            principal_id,
            None,
            true,
        )
        .await
    }

    async fn list_clients(&self) -> StoreResult<Vec<Client>> {
        let mut state = self.state.write().await;
        state.reads += 1;
        self.check_fault(StoreOperation::ListClients, None)?;
        Ok(state.clients.clone())
    }

    async fn list_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>> {
        self.read(
            StoreOperation::ListClientRoleMappings,
            principal_id,
            Some(client_id),
            false,
        )
        .await
    }

    async fn list_composite_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
    ) -> StoreResult<Vec<Role>> {
        self.read(
            StoreOperation::ListCompositeClientRoleMappings,
            principal_id,
            Some(client_id),
            true,
        )
        .await
    }

    async fn add_realm_role_mappings(&self, principal_id: &str, roles: &[Role]) -> StoreResult<()> {
        self.write(StoreOperation::AddRealmRoleMappings, principal_id, None, roles)
            .await
    }

    async fn add_client_role_mappings(
        &self,
        principal_id: &str,
        client_id: &str,
        roles: &[Role],
    ) -> StoreResult<()> {
        self.write(
            StoreOperation::AddClientRoleMappings,
            principal_id,
            Some(client_id),
            roles,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryRoleStore {
        MemoryRoleStore::new()
            .with_realm_role(Role::new("admin").with_id("r-admin"), &["r-base", "r-view"])
            .with_realm_role(Role::new("base").with_id("r-base"), &["r-audit"])
            .with_realm_role(Role::new("audit").with_id("r-audit"), &["r-admin"])
            .with_client(Client::new("app1").with_id("c-1"))
            .with_client_role("c-1", Role::new("viewer").with_id("r-view"), &[])
            .with_principal("g-1")
            .with_mapping("g-1", "r-admin")
    }

    fn ids(roles: &[Role]) -> Vec<&str> {
        roles.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_composite_expansion_is_scoped_and_terminates() {
        let store = store();

        let realm = store.list_composite_realm_role_mappings("g-1").await.unwrap();
        assert_eq!(ids(&realm), vec!["r-admin", "r-base", "r-audit"]);

        let client = store
            .list_composite_client_role_mappings("g-1", "c-1")
            .await
            .unwrap();
        assert_eq!(ids(&client), vec!["r-view"]);
        assert!(client[0].client_role);
        assert_eq!(client[0].container_id.as_deref(), Some("c-1"));

        assert!(store
            .list_client_role_mappings("g-1", "c-1")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.read_count().await, 3);
    }

    #[tokio::test]
    async fn test_unknown_principal_and_client() {
        let store = store();

        let err = store.list_realm_role_mappings("nobody").await.unwrap_err();
        assert_eq!(err.to_string(), "Principal not found: nobody");

        let err = store
            .add_client_role_mappings("g-1", "c-9", &[Role::new("x").with_id("r-x")])
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<MemoryStoreError>(),
            Some(&MemoryStoreError::UnknownClient("c-9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_rejects_role_of_other_scope() {
        let store = store();
        let viewer = Role::new("viewer").with_id("r-view");

        assert!(store.add_realm_role_mappings("g-1", &[viewer.clone()]).await.is_err());
        store
            .add_client_role_mappings("g-1", "c-1", &[viewer])
            .await
            .unwrap();
        assert_eq!(store.assigned_role_ids("g-1").await, vec!["r-admin", "r-view"]);
        assert_eq!(store.writes().await.len(), 2);
    }

    #[tokio::test]
    async fn test_fault_targets_single_client() {
        let store = store()
            .with_client(Client::new("app2").with_id("c-2"))
            .fail_on_client(StoreOperation::ListClientRoleMappings, "c-2");

        assert!(store.list_client_role_mappings("g-1", "c-1").await.is_ok());
        let err = store
            .list_client_role_mappings("g-1", "c-2")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Injected failure in list_client_role_mappings"
        );
    }
}
