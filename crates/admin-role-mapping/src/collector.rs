//! Role source collection
//!
//! Gathers a principal's assigned and effective roles for the realm and for
//! every client. All reads are issued concurrently:
//!
//! ```text
//! realm:    assigned ─┐
//!           effective ┴─ join ─┐
//! clients ─→ per client:       ├─ join ─→ CollectedRoles
//!           assigned ─┐        │
//!           effective ┴─ join ─┘
//! ```
//!
//! The first failing read aborts the collection. Reads still in flight are
//! dropped with it.

use crate::error::{RoleMappingError, RoleMappingResult};
use crate::row::MappingScope;
use crate::store::RoleMappingStore;
use admin_model::{Client, Role};
use futures::future::try_join_all;
use tracing::{debug, instrument};

/// Assigned and effective roles of one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSets {
    /// Roles assigned directly to the principal
    pub assigned: Vec<Role>,
    /// Assigned roles plus everything they compose
    pub effective: Vec<Role>,
}

impl RoleSets {
    /// Create from the two role lists.
    pub fn new(assigned: Vec<Role>, effective: Vec<Role>) -> Self {
        Self {
            assigned,
            effective,
        }
    }
}

/// Role sets of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRoleSets {
    /// The client owning the roles
    pub client: Client,
    /// Its assigned and effective roles
    pub roles: RoleSets,
}

/// Everything one collection pass produced.
///
/// `clients` keeps the order in which the store listed the clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedRoles {
    /// Realm scope
    pub realm: RoleSets,
    /// Client scopes, in client-list order
    pub clients: Vec<ClientRoleSets>,
}

impl CollectedRoles {
    /// Role sets of a scope.
    pub fn get(&self, scope: &MappingScope) -> Option<&RoleSets> {
        match scope {
            MappingScope::Realm => Some(&self.realm),
            MappingScope::Client(id) => self
                .clients
                .iter()
                .find(|entry| &entry.client.id == id)
                .map(|entry| &entry.roles),
        }
    }

    /// All scopes, realm first.
    pub fn scopes(&self) -> impl Iterator<Item = (MappingScope, &RoleSets)> + '_ {
        std::iter::once((MappingScope::Realm, &self.realm)).chain(
            self.clients
                .iter()
                .map(|entry| (MappingScope::Client(entry.client.id.clone()), &entry.roles)),
        )
    }
}

/// Collect the principal's role sets for the realm and every client.
#[instrument(skip(store))]
pub async fn collect<S>(store: &S, principal_id: &str) -> RoleMappingResult<CollectedRoles>
where
    S: RoleMappingStore + ?Sized,
{
    if principal_id.trim().is_empty() {
        return Err(RoleMappingError::EmptyPrincipalId);
    }

    let realm = async {
        let (assigned, effective) = tokio::try_join!(
            store.list_realm_role_mappings(principal_id),
            store.list_composite_realm_role_mappings(principal_id),
        )
        .map_err(RoleMappingError::fetch(MappingScope::Realm))?;
        Ok::<_, RoleMappingError>(RoleSets::new(assigned, effective))
    };

    let clients = async {
        let clients = store
            .list_clients()
            .await
            .map_err(|source| RoleMappingError::ClientList { source })?;
        debug!(count = clients.len(), "Collecting client role mappings");

        try_join_all(clients.into_iter().map(|client| async move {
            let (assigned, effective) = tokio::try_join!(
                store.list_client_role_mappings(principal_id, &client.id),
                store.list_composite_client_role_mappings(principal_id, &client.id),
            )
            .map_err(RoleMappingError::fetch(MappingScope::Client(client.id.clone())))?;
            Ok::<_, RoleMappingError>(ClientRoleSets {
                client,
                roles: RoleSets::new(assigned, effective),
            })
        }))
        .await
    };

    let (realm, clients) = tokio::try_join!(realm, clients)?;
    Ok(CollectedRoles { realm, clients })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRoleStore, StoreOperation};

    fn store() -> MemoryRoleStore {
        MemoryRoleStore::new()
            .with_realm_role(Role::new("admin").with_id("r-admin"), &["r-base"])
            .with_realm_role(Role::new("base").with_id("r-base"), &[])
            .with_client(Client::new("app1").with_id("c-1"))
            .with_client(Client::new("app2").with_id("c-2"))
            .with_client_role("c-2", Role::new("viewer").with_id("r-view"), &[])
            .with_principal("g-1")
            .with_mapping("g-1", "r-admin")
            .with_mapping("g-1", "r-view")
    }

    #[tokio::test]
    async fn test_collect_realm_and_clients() {
        let collected = collect(&store(), "g-1").await.unwrap();

        let names = |roles: &[Role]| roles.iter().map(|r| r.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&collected.realm.assigned), vec!["admin"]);
        assert_eq!(names(&collected.realm.effective), vec!["admin", "base"]);

        let clients: Vec<&str> = collected
            .clients
            .iter()
            .map(|entry| entry.client.client_id.as_str())
            .collect();
        assert_eq!(clients, vec!["app1", "app2"]);
        assert!(collected.clients[0].roles.effective.is_empty());
        assert_eq!(names(&collected.clients[1].roles.assigned), vec!["viewer"]);
    }

    #[tokio::test]
    async fn test_assigned_is_subset_of_effective() {
        let collected = collect(&store(), "g-1").await.unwrap();

        for (scope, sets) in collected.scopes() {
            for role in &sets.assigned {
                assert!(
                    sets.effective.iter().any(|r| r.id == role.id),
                    "{} missing from effective roles of {}",
                    role.name,
                    scope
                );
            }
        }
    }

    #[tokio::test]
    async fn test_get_by_scope() {
        let collected = collect(&store(), "g-1").await.unwrap();

        assert_eq!(collected.get(&MappingScope::Realm), Some(&collected.realm));
        assert!(collected
            .get(&MappingScope::Client("c-2".to_string()))
            .is_some());
        assert!(collected
            .get(&MappingScope::Client("nope".to_string()))
            .is_none());
    }

    #[tokio::test]
    async fn test_empty_principal_rejected_without_reads() {
        let store = store();
        let result = collect(&store, "  ").await;

        assert!(matches!(result, Err(RoleMappingError::EmptyPrincipalId)));
        assert_eq!(store.read_count().await, 0);
    }

    #[tokio::test]
    async fn test_failing_client_read_aborts_collection() {
        let store = store().fail_on_client(StoreOperation::ListCompositeClientRoleMappings, "c-2");
        let err = collect(&store, "g-1").await.unwrap_err();

        assert!(err.is_fetch());
        assert_eq!(err.scope(), Some(&MappingScope::Client("c-2".to_string())));
    }

    #[tokio::test]
    async fn test_failing_client_list_aborts_collection() {
        let store = store().fail_on(StoreOperation::ListClients);
        let err = collect(&store, "g-1").await.unwrap_err();

        assert!(matches!(err, RoleMappingError::ClientList { .. }));
    }
}
