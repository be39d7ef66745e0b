//! Client CRUD integration tests.

mod common;

use common::TestApp;
use invoicing_service::dtos::client::{CreateClientRequest, UpdateClientRequest};
use service_core::error::AppError;
use uuid::Uuid;

fn client_req(name: &str, email: &str, address: &str) -> CreateClientRequest {
    CreateClientRequest {
        name: name.to_string(),
        email: email.to_string(),
        address: address.to_string(),
    }
}

#[tokio::test]
async fn create_then_get_by_id_round_trips() {
    let app = TestApp::new();

    let created = app
        .state
        .clients
        .create(client_req("Acme Corp", "billing@acme.example", "1 Industrial Way"))
        .await
        .unwrap();

    let fetched = app.state.clients.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Acme Corp");
    assert_eq!(fetched.email, "billing@acme.example");
    assert_eq!(fetched.address, "1 Industrial Way");
}

#[tokio::test]
async fn get_all_on_an_empty_store_returns_an_empty_page() {
    let app = TestApp::new();
    let page = app.state.clients.get_all(1, 10).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn get_all_orders_by_name_and_pages() {
    let app = TestApp::new();
    for name in ["Beta LLC", "Alpha Inc", "Gamma GmbH"] {
        app.state
            .clients
            .create(client_req(name, "contact@example.com", "Somewhere 1"))
            .await
            .unwrap();
    }

    let first = app.state.clients.get_all(1, 2).await.unwrap();
    let names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Alpha Inc", "Beta LLC"]);

    let second = app.state.clients.get_all(2, 2).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "Gamma GmbH");
}

#[tokio::test]
async fn create_reports_every_violated_rule_at_once() {
    let app = TestApp::new();

    let err = app
        .state
        .clients
        .create(client_req("", "not-an-email", &"x".repeat(201)))
        .await
        .unwrap_err();

    let AppError::ValidationError(errors) = err else {
        panic!("expected a validation failure");
    };
    let message = errors.to_string();
    assert!(message.contains("Name is required"));
    assert!(message.contains("Invalid email format"));
    assert!(message.contains("Address cannot exceed 200 characters"));
}

#[tokio::test]
async fn update_missing_client_is_not_found() {
    let app = TestApp::new();

    let err = app
        .state
        .clients
        .update(
            Uuid::new_v4(),
            UpdateClientRequest {
                name: "Acme Corp".to_string(),
                email: "billing@acme.example".to_string(),
                address: "1 Industrial Way".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("Client not found"));
}

#[tokio::test]
async fn update_rewrites_the_stored_fields() {
    let app = TestApp::new();
    let created = app.seed_client().await;

    let updated = app
        .state
        .clients
        .update(
            created.id,
            UpdateClientRequest {
                name: "Acme Ltd".to_string(),
                email: "accounts@acme.example".to_string(),
                address: "2 Industrial Way".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme Ltd");

    let fetched = app.state.clients.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched.email, "accounts@acme.example");
}

#[tokio::test]
async fn deleted_client_is_hidden_from_reads_but_keeps_its_row() {
    let app = TestApp::new();
    let created = app.seed_client().await;

    app.state.clients.delete(created.id).await.unwrap();

    let err = app.state.clients.get_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(app.state.clients.get_all(1, 10).await.unwrap().is_empty());
    // The row survives; deletion is a flag, not a removal.
    assert_eq!(app.store.client_rows(), 1);

    // Deleting twice reports not-found rather than resurrecting anything.
    let err = app.state.clients.delete(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
