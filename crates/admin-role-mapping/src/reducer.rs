//! Merge policy
//!
//! Turns collected role sets into the ordered row list shown to the user.
//! Directly assigned roles always appear; roles held only through a composite
//! appear after them unless `hide_inherited` is set.

use crate::collector::{CollectedRoles, RoleSets};
use crate::row::{Row, RowKey, RowScope};
use std::collections::HashSet;

/// Rows of a single scope.
///
/// Assigned roles come first, in store order. A role id is never emitted
/// twice for the same scope.
pub fn merge_scope(scope: &RowScope, sets: &RoleSets, hide_inherited: bool) -> Vec<Row> {
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(sets.effective.len().max(sets.assigned.len()));

    for role in &sets.assigned {
        if seen.insert(role.id.as_str()) {
            rows.push(row_for(scope, role.clone()));
        }
    }

    if !hide_inherited {
        for role in &sets.effective {
            if seen.insert(role.id.as_str()) {
                rows.push(row_for(scope, role.clone()).as_inherited());
            }
        }
    }

    rows
}

/// Rows of every scope: realm first, then clients in the order they were
/// collected.
///
/// The same role id under two clients yields two rows.
pub fn merge(collected: &CollectedRoles, hide_inherited: bool) -> Vec<Row> {
    let mut rows = merge_scope(&RowScope::Realm, &collected.realm, hide_inherited);
    for entry in &collected.clients {
        let scope = RowScope::Client(entry.client.clone());
        rows.extend(merge_scope(&scope, &entry.roles, hide_inherited));
    }
    rows
}

/// Candidates that are not already directly assigned in `current`.
///
/// Inherited rows in `current` do not count as assigned, so a role held only
/// through a composite can still be assigned directly.
pub fn exclude_assigned(candidates: Vec<Row>, current: &[Row]) -> Vec<Row> {
    let assigned: HashSet<RowKey> = current
        .iter()
        .filter(|row| !row.inherited)
        .map(Row::key)
        .collect();

    candidates
        .into_iter()
        .filter(|row| !assigned.contains(&row.key()))
        .collect()
}

fn row_for(scope: &RowScope, role: admin_model::Role) -> Row {
    Row {
        role,
        scope: scope.clone(),
        inherited: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ClientRoleSets;
    use admin_model::{Client, Role};

    fn role(name: &str) -> Role {
        Role::new(name).with_id(format!("r-{}", name))
    }

    fn names(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|row| row.role.name.as_str()).collect()
    }

    #[test]
    fn test_assigned_then_inherited() {
        let sets = RoleSets::new(
            vec![role("admin")],
            vec![role("base"), role("admin"), role("audit")],
        );

        let rows = merge_scope(&RowScope::Realm, &sets, false);
        assert_eq!(names(&rows), vec!["admin", "base", "audit"]);
        assert!(!rows[0].inherited);
        assert!(rows[1].inherited && rows[2].inherited);
    }

    #[test]
    fn test_hide_inherited_keeps_only_assigned() {
        let sets = RoleSets::new(vec![role("admin")], vec![role("admin"), role("base")]);

        let hidden = merge_scope(&RowScope::Realm, &sets, true);
        let shown = merge_scope(&RowScope::Realm, &sets, false);

        assert_eq!(names(&hidden), vec!["admin"]);
        // hidden rows are a prefix, hence a subsequence, of the full list
        assert_eq!(&shown[..hidden.len()], hidden.as_slice());
    }

    #[test]
    fn test_no_duplicate_role_within_scope() {
        let sets = RoleSets::new(
            vec![role("admin"), role("admin")],
            vec![role("admin"), role("base"), role("base")],
        );

        let rows = merge_scope(&RowScope::Realm, &sets, false);
        assert_eq!(names(&rows), vec!["admin", "base"]);
    }

    #[test]
    fn test_merge_orders_realm_then_clients() {
        let app1 = Client::new("app1").with_id("c-1");
        let app2 = Client::new("app2").with_id("c-2");
        let collected = CollectedRoles {
            realm: RoleSets::new(vec![role("admin")], vec![role("admin")]),
            clients: vec![
                ClientRoleSets {
                    client: app1,
                    roles: RoleSets::new(vec![], vec![role("viewer")]),
                },
                ClientRoleSets {
                    client: app2,
                    roles: RoleSets::new(vec![role("viewer")], vec![role("viewer")]),
                },
            ],
        };

        let rows = merge(&collected, false);
        let scopes: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.client().map(|c| c.client_id.as_str()))
            .collect();
        assert_eq!(scopes, vec![None, Some("app1"), Some("app2")]);
        // same role id under two clients is two rows
        assert_eq!(rows[1].role.id, rows[2].role.id);
        assert_ne!(rows[1].key(), rows[2].key());

        assert_eq!(merge(&collected, false), rows);
        assert_eq!(merge(&collected, true).len(), 2);
    }

    #[test]
    fn test_exclude_assigned() {
        let app1 = Client::new("app1").with_id("c-1");
        let current = vec![
            Row::realm(role("admin")),
            Row::realm(role("base")).as_inherited(),
            Row::for_client(role("viewer"), app1.clone()),
        ];
        let candidates = vec![
            Row::realm(role("admin")),
            Row::realm(role("base")),
            Row::realm(role("viewer")),
            Row::for_client(role("viewer"), app1.clone()),
            Row::for_client(role("editor"), app1),
        ];

        let assignable = exclude_assigned(candidates, &current);
        let keys: Vec<(Option<&str>, &str)> = assignable
            .iter()
            .map(|row| (row.client().map(|c| c.client_id.as_str()), row.role.name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(None, "base"), (None, "viewer"), (Some("app1"), "editor")]
        );
    }
}
