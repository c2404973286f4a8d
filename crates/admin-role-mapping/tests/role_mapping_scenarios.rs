//! End-to-end behaviour of load and save against the in-memory store.

use admin_model::{Client, Principal, Role};
use admin_role_mapping::{
    collect, merge, merge_scope, AlertLog, AlertVariant, MappingScope, MemoryRoleStore,
    RoleMappingSession, RoleSets, Row, RowScope, StoreOperation, WriteCall,
};
use std::sync::Arc;

fn role(name: &str) -> Role {
    Role::new(name).with_id(format!("r-{}", name))
}

fn app1() -> Client {
    Client::new("app1").with_id("c-app1")
}

fn app2() -> Client {
    Client::new("app2").with_id("c-app2")
}

/// Realm: admin composes base. app1: viewer, reachable through admin.
/// app2: reader. Group g-1 holds admin directly.
fn store() -> MemoryRoleStore {
    MemoryRoleStore::new()
        .with_realm_role(role("admin"), &["r-base", "r-viewer"])
        .with_realm_role(role("base"), &[])
        .with_realm_role(role("audit"), &[])
        .with_client(app1())
        .with_client(app2())
        .with_client_role("c-app1", role("viewer"), &[])
        .with_client_role("c-app2", role("reader"), &[])
        .with_principal("g-1")
        .with_mapping("g-1", "r-admin")
}

fn session(store: MemoryRoleStore) -> (RoleMappingSession<MemoryRoleStore>, Arc<AlertLog>) {
    let alerts = Arc::new(AlertLog::new());
    let session = RoleMappingSession::new(
        Arc::new(store),
        Principal::group("g-1", "Admins"),
        alerts.clone(),
    );
    (session, alerts)
}

fn labels(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|row| match row.client() {
            Some(client) => format!("{}/{}", client.client_id, row.role.name),
            None => row.role.name.clone(),
        })
        .collect()
}

// =============================================================================
// Load
// =============================================================================

#[tokio::test]
async fn test_inherited_realm_role_shown() {
    let (session, _) = session(store());

    let rows = session.load(false).await.unwrap();
    let realm: Vec<&Row> = rows.iter().filter(|row| row.is_realm()).collect();

    assert_eq!(realm.len(), 2);
    assert_eq!(realm[0].role.name, "admin");
    assert!(!realm[0].inherited);
    assert_eq!(realm[1].role.name, "base");
    assert!(realm[1].inherited);
}

#[tokio::test]
async fn test_inherited_realm_role_hidden() {
    let (session, _) = session(store());

    let rows = session.load(true).await.unwrap();

    assert_eq!(labels(&rows), vec!["admin"]);
}

#[tokio::test]
async fn test_inherited_client_role_follows_toggle() {
    let (session, _) = session(store());

    let shown = session.load(false).await.unwrap();
    let app1_rows: Vec<&Row> = shown
        .iter()
        .filter(|row| row.client().map(|c| c.id.as_str()) == Some("c-app1"))
        .collect();
    assert_eq!(app1_rows.len(), 1);
    assert_eq!(app1_rows[0].role.name, "viewer");

    let hidden = session.load(true).await.unwrap();
    assert!(hidden
        .iter()
        .all(|row| row.client().map(|c| c.id.as_str()) != Some("c-app1")));
}

#[tokio::test]
async fn test_fresh_session_reload_shows_inherited_roles() {
    let (session, _) = session(store());

    let rows = session.reload().await.unwrap();

    assert!(!session.hide_inherited());
    assert_eq!(labels(&rows), vec!["admin", "base", "app1/viewer"]);
}

#[tokio::test]
async fn test_any_failing_read_fails_load() {
    let failures = [
        (StoreOperation::ListRealmRoleMappings, None),
        (StoreOperation::ListCompositeRealmRoleMappings, None),
        (StoreOperation::ListClients, None),
        (StoreOperation::ListClientRoleMappings, Some("c-app1")),
        (StoreOperation::ListCompositeClientRoleMappings, Some("c-app2")),
    ];

    for (operation, client) in failures {
        let store = match client {
            Some(id) => store().fail_on_client(operation, id),
            None => store().fail_on(operation),
        };
        let (session, alerts) = session(store);

        let result = session.load(false).await;

        assert!(result.is_err(), "{} should fail the load", operation);
        assert!(result.unwrap_err().is_fetch());
        assert!(alerts.alerts().is_empty());
    }
}

#[tokio::test]
async fn test_rows_ordered_realm_then_client_list_order() {
    let store = store().with_mapping("g-1", "r-reader");
    let (session, _) = session(store);

    let rows = session.load(false).await.unwrap();

    assert_eq!(
        labels(&rows),
        vec!["admin", "base", "app1/viewer", "app2/reader"]
    );
}

#[tokio::test]
async fn test_load_is_repeatable() {
    let (session, _) = session(store());

    let first = session.load(false).await.unwrap();
    let second = session.load(false).await.unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// Merge properties
// =============================================================================

#[tokio::test]
async fn test_assigned_subset_of_effective_per_scope() {
    let store = store().with_mapping("g-1", "r-reader");
    let collected = collect(&store, "g-1").await.unwrap();

    for (scope, sets) in collected.scopes() {
        assert!(
            sets.assigned
                .iter()
                .all(|role| sets.effective.contains(role)),
            "assigned roles of {} not effective",
            scope
        );
    }
}

#[tokio::test]
async fn test_hidden_rows_are_subsequence_and_equal_assigned() {
    let collected = collect(&store(), "g-1").await.unwrap();

    for (scope, sets) in collected.scopes() {
        let row_scope = match &scope {
            MappingScope::Realm => RowScope::Realm,
            MappingScope::Client(id) => RowScope::Client(
                collected
                    .clients
                    .iter()
                    .find(|entry| &entry.client.id == id)
                    .map(|entry| entry.client.clone())
                    .unwrap(),
            ),
        };
        let hidden = merge_scope(&row_scope, sets, true);
        let shown = merge_scope(&row_scope, sets, false);

        let mut remaining = shown.iter();
        assert!(hidden.iter().all(|row| remaining.any(|r| r == row)));
        let hidden_roles: Vec<&Role> = hidden.iter().map(|row| &row.role).collect();
        let assigned: Vec<&Role> = sets.assigned.iter().collect();
        assert_eq!(hidden_roles, assigned);
    }
}

#[test]
fn test_same_role_under_two_clients_is_two_rows() {
    let shared = role("shared");
    let sets = RoleSets::new(vec![shared.clone()], vec![shared.clone()]);

    let mut rows = merge_scope(&RowScope::Client(app1()), &sets, false);
    rows.extend(merge_scope(&RowScope::Client(app2()), &sets, false));

    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].key(), rows[1].key());
}

#[tokio::test]
async fn test_merge_output_is_stable() {
    let collected = collect(&store(), "g-1").await.unwrap();

    assert_eq!(merge(&collected, false), merge(&collected, false));
    assert_eq!(merge(&collected, true), merge(&collected, true));
}

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn test_save_issues_one_call_per_scope() {
    let store = Arc::new(store());
    let alerts = Arc::new(AlertLog::new());
    let session = RoleMappingSession::new(
        store.clone(),
        Principal::group("g-1", "Admins"),
        alerts.clone(),
    );

    let rows = vec![
        Row::realm(role("audit")),
        Row::for_client(role("viewer"), app1()),
        Row::for_client(role("reader"), app2()),
    ];
    let summary = session.save(&rows).await.unwrap();

    assert_eq!(summary.realm_calls, 1);
    assert_eq!(summary.client_calls, 2);

    let mut writes = store.writes().await;
    writes.sort_by_key(|call| match call {
        WriteCall::Realm { .. } => String::new(),
        WriteCall::Client { client_id, .. } => client_id.clone(),
    });
    assert_eq!(
        writes,
        vec![
            WriteCall::Realm {
                principal_id: "g-1".to_string(),
                role_ids: vec!["r-audit".to_string()],
            },
            WriteCall::Client {
                principal_id: "g-1".to_string(),
                client_id: "c-app1".to_string(),
                role_ids: vec!["r-viewer".to_string()],
            },
            WriteCall::Client {
                principal_id: "g-1".to_string(),
                client_id: "c-app2".to_string(),
                role_ids: vec!["r-reader".to_string()],
            },
        ]
    );

    let emitted = alerts.alerts();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].variant, AlertVariant::Success);
}

#[tokio::test]
async fn test_saved_roles_visible_after_reload() {
    let (session, _) = session(store());

    session
        .save(&[Row::for_client(role("reader"), app2())])
        .await
        .unwrap();

    let rows = session.load(true).await.unwrap();
    assert_eq!(labels(&rows), vec!["admin", "app2/reader"]);
}

#[tokio::test]
async fn test_failed_client_batch_leaves_others_applied() {
    let store = Arc::new(store().fail_on_client(StoreOperation::AddClientRoleMappings, "c-app2"));
    let alerts = Arc::new(AlertLog::new());
    let session = RoleMappingSession::new(
        store.clone(),
        Principal::group("g-1", "Admins"),
        alerts.clone(),
    );

    let rows = vec![
        Row::realm(role("audit")),
        Row::for_client(role("reader"), app2()),
    ];
    let err = session.save(&rows).await.unwrap_err();

    assert_eq!(err.scope(), Some(&MappingScope::Client("c-app2".to_string())));
    let emitted = alerts.alerts();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].variant, AlertVariant::Danger);
    // realm batch is not rolled back
    assert!(store
        .assigned_role_ids("g-1")
        .await
        .contains(&"r-audit".to_string()));
}

#[tokio::test]
async fn test_assignable_rows_skip_direct_assignments() {
    let (session, _) = session(store());
    let current = session.load(false).await.unwrap();

    let candidates = vec![
        Row::realm(role("admin")),
        Row::realm(role("base")),
        Row::realm(role("audit")),
    ];
    let assignable = session.assignable_rows(candidates, &current);

    assert_eq!(labels(&assignable), vec!["base", "audit"]);
}
