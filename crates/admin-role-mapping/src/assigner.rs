//! Write-back of selected rows
//!
//! Rows are partitioned by scope and written with one batch call per scope.
//! The realm call and every client call run concurrently. There is no
//! transaction over them: when one fails, batches that already succeeded stay
//! applied.

use crate::error::{RoleMappingError, RoleMappingResult};
use crate::row::{MappingScope, Row, RowScope};
use crate::store::RoleMappingStore;
use admin_model::{Client, Role};
use futures::future::try_join_all;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Rows grouped into write batches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPlan {
    /// Realm roles, one batch
    pub realm: Vec<Role>,
    /// One batch per client, in order of first appearance
    pub clients: Vec<(Client, Vec<Role>)>,
}

impl AssignmentPlan {
    /// Number of write calls the plan issues.
    pub fn call_count(&self) -> usize {
        usize::from(!self.realm.is_empty()) + self.clients.len()
    }

    /// Total roles across all batches.
    pub fn role_count(&self) -> usize {
        self.realm.len() + self.clients.iter().map(|(_, roles)| roles.len()).sum::<usize>()
    }

    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.realm.is_empty() && self.clients.is_empty()
    }
}

/// What a successful assignment wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentSummary {
    /// Realm batch calls issued (0 or 1)
    pub realm_calls: usize,
    /// Client batch calls issued
    pub client_calls: usize,
    /// Roles written across all calls
    pub roles_assigned: usize,
}

/// Group rows by scope.
///
/// A role selected twice for the same scope is sent once.
pub fn partition(rows: &[Row]) -> AssignmentPlan {
    let mut plan = AssignmentPlan::default();
    let mut seen: HashSet<(MappingScope, &str)> = HashSet::new();

    for row in rows {
        if !seen.insert((row.scope.mapping_scope(), row.role.id.as_str())) {
            continue;
        }
        match &row.scope {
            RowScope::Realm => plan.realm.push(row.role.clone()),
            RowScope::Client(client) => {
                match plan.clients.iter_mut().find(|(c, _)| c.id == client.id) {
                    Some((_, roles)) => roles.push(row.role.clone()),
                    None => plan.clients.push((client.clone(), vec![row.role.clone()])),
                }
            }
        }
    }

    plan
}

/// Assign the rows to the principal.
///
/// The first failing call is returned; results of the others are discarded.
#[instrument(skip(store, rows), fields(rows = rows.len()))]
pub async fn assign<S>(
    store: &S,
    principal_id: &str,
    rows: &[Row],
) -> RoleMappingResult<AssignmentSummary>
where
    S: RoleMappingStore + ?Sized,
{
    if principal_id.trim().is_empty() {
        return Err(RoleMappingError::EmptyPrincipalId);
    }

    let plan = partition(rows);
    debug!(
        realm_roles = plan.realm.len(),
        clients = plan.clients.len(),
        "Assignment plan"
    );

    let realm = async {
        if plan.realm.is_empty() {
            return Ok(());
        }
        store
            .add_realm_role_mappings(principal_id, &plan.realm)
            .await
            .map_err(RoleMappingError::write(MappingScope::Realm))
    };

    let clients = try_join_all(plan.clients.iter().map(|(client, roles)| async move {
        store
            .add_client_role_mappings(principal_id, &client.id, roles)
            .await
            .map_err(RoleMappingError::write(MappingScope::Client(
                client.id.clone(),
            )))
    }));

    tokio::try_join!(realm, clients)?;

    let summary = AssignmentSummary {
        realm_calls: usize::from(!plan.realm.is_empty()),
        client_calls: plan.clients.len(),
        roles_assigned: plan.role_count(),
    };
    info!(
        roles = summary.roles_assigned,
        calls = plan.call_count(),
        "Role mappings assigned"
    );
    Ok(summary)
}
