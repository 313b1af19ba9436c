//! End-to-end tests of the catalog controller driven through the client
//! handle, with the remote service scripted by the mock.

use std::time::Duration;

use catalog_console::controller::{CatalogController, CatalogError, CommandKind};
use catalog_console::lifecycle::CatalogSystem;
use catalog_console::model::{Product, ProductDraft};
use catalog_console::service::mock::MockProductService;
use catalog_console::service::ServiceError;

fn product(id: &str, name: &str) -> Product {
    Product::new(id, name, "", 10.0)
}

/// Waits until all but `remaining` queued expectations have been consumed,
/// i.e. until the corresponding in-flight calls have reached the service.
async fn wait_for_calls(mock: &MockProductService, remaining: usize) {
    while mock.remaining() > remaining {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn initial_load_populates_the_collection_in_order() {
    let mock = MockProductService::new();
    mock.expect_list()
        .return_ok(vec![product("a", "A"), product("b", "B"), product("c", "C")]);

    let system = CatalogSystem::activate(mock.clone());
    let snapshot = system.client.snapshot().await.unwrap();

    let ids: Vec<_> = snapshot.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
    assert!(!snapshot.is_empty);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn load_failure_surfaces_error_and_leaves_collection_empty() {
    let mock = MockProductService::new();
    mock.expect_list()
        .return_err(ServiceError::Transport("connection refused".into()));

    let system = CatalogSystem::activate(mock.clone());
    let snapshot = system.client.snapshot().await.unwrap();

    assert!(snapshot.products.is_empty());
    assert!(snapshot.is_empty);
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error,
        Some(CatalogError::Load(ServiceError::Transport(
            "connection refused".into()
        )))
    );

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn create_appends_the_canonical_record() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A")]);
    // The service is the id authority: the draft has none, the canonical
    // record comes back with one.
    mock.expect_create().return_ok(product("b", "Term Life"));

    let system = CatalogSystem::activate(mock.clone());

    let created = system
        .client
        .create(ProductDraft::new("Term Life", "20-year term", 29.0))
        .await
        .unwrap();
    assert_eq!(created, product("b", "Term Life"));

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("a", "A"), product("b", "Term Life")]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn failed_create_leaves_the_collection_unchanged() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A")]);
    mock.expect_create()
        .return_err(ServiceError::Rejected("premium out of range".into()));

    let system = CatalogSystem::activate(mock.clone());

    let result = system
        .client
        .create(ProductDraft::new("Term Life", "", -1.0))
        .await;
    assert_eq!(
        result,
        Err(CatalogError::Command {
            op: CommandKind::Create,
            source: ServiceError::Rejected("premium out of range".into()),
        })
    );

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("a", "A")]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn update_replaces_the_entry_in_place() {
    let mock = MockProductService::new();
    mock.expect_list()
        .return_ok(vec![product("a", "A"), product("b", "B"), product("c", "C")]);
    // The server normalizes fields; its record wins over the submitted one.
    mock.expect_update().return_ok(product("b", "B (normalized)"));

    let system = CatalogSystem::activate(mock.clone());

    let updated = system.client.commit_edit(product("b", "b edited")).await.unwrap();
    assert_eq!(updated.name, "B (normalized)");

    let snapshot = system.client.snapshot().await.unwrap();
    let names: Vec<_> = snapshot.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B (normalized)", "C"]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn failed_update_leaves_the_collection_unchanged() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A"), product("b", "B")]);
    mock.expect_update()
        .return_err(ServiceError::Transport("timeout".into()));

    let system = CatalogSystem::activate(mock.clone());

    let result = system.client.commit_edit(product("b", "B prime")).await;
    assert!(result.is_err());

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("a", "A"), product("b", "B")]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn delete_removes_only_on_an_explicit_true() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A"), product("b", "B")]);
    mock.expect_delete().return_ok(false);
    mock.expect_delete().return_ok(true);

    let system = CatalogSystem::activate(mock.clone());

    // "Accepted but not deleted" leaves the collection alone.
    assert_eq!(system.client.delete("a".into()).await, Ok(false));
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products.len(), 2);

    assert_eq!(system.client.delete("a".into()).await, Ok(true));
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("b", "B")]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn deleting_the_last_product_yields_the_empty_state() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A")]);
    mock.expect_delete().return_ok(true);

    let system = CatalogSystem::activate(mock.clone());

    system.client.delete("a".into()).await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert!(snapshot.is_empty);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn request_edit_is_race_safe() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A")]);

    let system = CatalogSystem::activate(mock.clone());

    // A stale id (row already gone) is silently ignored.
    system.client.request_edit("ghost".into()).await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.edit_target, None);
    assert!(!snapshot.edit_dialog_open);

    system.client.request_edit("a".into()).await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.edit_target, Some(product("a", "A")));
    assert!(snapshot.edit_dialog_open);

    // Closing the dialog keeps the selection.
    system.client.set_edit_dialog(false).await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert!(!snapshot.edit_dialog_open);
    assert_eq!(snapshot.edit_target, Some(product("a", "A")));

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn teardown_discards_the_in_flight_load() {
    let mock = MockProductService::new();
    let resolver = mock.expect_list().stall();

    let system = CatalogSystem::activate(mock.clone());

    // The load is in flight: loading is set, the collection is empty.
    let snapshot = system.client.snapshot().await.unwrap();
    assert!(snapshot.loading);
    assert!(snapshot.is_empty);

    system.deactivate().await.unwrap();

    // Deactivation dropped the pinned load future, so the late response has
    // nowhere to land: the collection was never touched.
    assert!(resolver.send(Ok(vec![product("a", "A")])).is_err());
    mock.verify();
}

#[tokio::test]
async fn settlement_is_applied_after_its_dialog_closed() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![]);
    let resolver = mock.expect_create().stall();

    let system = CatalogSystem::activate(mock.clone());
    system.client.set_create_dialog(true).await.unwrap();

    let client = system.client.clone();
    let create_task =
        tokio::spawn(async move { client.create(ProductDraft::new("Term Life", "", 29.0)).await });

    // Close the dialog while the create is still in flight.
    wait_for_calls(&mock, 0).await;
    system.client.set_create_dialog(false).await.unwrap();

    resolver.send(Ok(product("p1", "Term Life"))).unwrap();
    let created = create_task.await.unwrap().unwrap();
    assert_eq!(created, product("p1", "Term Life"));

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("p1", "Term Life")]);
    assert!(!snapshot.create_dialog_open);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn late_update_for_a_deleted_product_is_discarded() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A"), product("b", "B")]);
    let update_resolver = mock.expect_update().stall();
    mock.expect_delete().return_ok(true);

    let system = CatalogSystem::activate(mock.clone());

    // Issue the update first and let it stall at the service.
    let client = system.client.clone();
    let update_task = tokio::spawn(async move { client.commit_edit(product("b", "B prime")).await });
    wait_for_calls(&mock, 1).await;

    // The delete settles first and wins.
    assert_eq!(system.client.delete("b".into()).await, Ok(true));
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("a", "A")]);

    // The update settles last, for an entry that no longer exists; the
    // service arbitrated final state, so the result is discarded.
    update_resolver.send(Ok(product("b", "B prime"))).unwrap();
    let updated = update_task.await.unwrap().unwrap();
    assert_eq!(updated.name, "B prime");

    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.products, vec![product("a", "A")]);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn command_failures_are_surfaced_and_cleared_on_the_next_command() {
    let mock = MockProductService::new();
    mock.expect_list().return_ok(vec![product("a", "A")]);
    mock.expect_delete()
        .return_err(ServiceError::Transport("timeout".into()));
    mock.expect_create().return_ok(product("b", "B"));

    let system = CatalogSystem::activate(mock.clone());

    let expected = CatalogError::Command {
        op: CommandKind::Delete,
        source: ServiceError::Transport("timeout".into()),
    };
    assert_eq!(system.client.delete("a".into()).await, Err(expected.clone()));

    // The failure is surfaced in the snapshot; the load error channel is
    // untouched and the view stays usable.
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.command_error, Some(expected));
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.products.len(), 1);

    // The next command clears it.
    system.client.create(ProductDraft::new("B", "", 5.0)).await.unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    assert_eq!(snapshot.command_error, None);

    system.deactivate().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn commands_fail_once_the_controller_is_gone() {
    let (controller, client) = CatalogController::new(MockProductService::new(), 8);
    drop(controller);

    assert_eq!(client.snapshot().await, Err(CatalogError::ControllerClosed));
}
