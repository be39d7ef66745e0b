//! HTTP surface tests driven through the router without a live listener.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::TestApp;
use http_body_util::BodyExt;
use invoicing_service::router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Registers a user and returns a bearer token for the protected routes.
async fn bearer(app: &Router) -> String {
    let res = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            json!({"username": "alice", "password": "s3cret-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .clone()
        .oneshot(post_json(
            "/api/users/login",
            json!({"username": "alice", "password": "s3cret-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    body_json(res).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "healthy");
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/clients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/clients")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_manage_clients_end_to_end() {
    let app = router(TestApp::new().state);
    let token = bearer(&app).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/clients")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(
            json!({
                "name": "Acme Corp",
                "email": "billing@acme.example",
                "address": "1 Industrial Way"
            })
            .to_string(),
        ))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    assert_eq!(created["name"], "Acme Corp");

    let req = Request::builder()
        .uri("/api/clients")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(post_json(
            "/api/users/login",
            json!({"username": "nobody", "password": "whatever!"}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["error"], "Invalid username or password");
}

#[tokio::test]
async fn validation_failures_surface_as_422_with_every_message() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(post_json(
            "/api/users",
            json!({"username": "", "password": "short"}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["error"], "Validation error");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("Username is required"));
    assert!(details.contains("Password must be at least 8 characters"));
}

#[tokio::test]
async fn unknown_ids_map_to_404() {
    let app = router(TestApp::new().state);
    let token = bearer(&app).await;

    let req = Request::builder()
        .uri(format!(
            "/api/invoices/{}/balance",
            uuid::Uuid::new_v4()
        ))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Invoice not found");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = router(TestApp::new().state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let doc = body_json(res).await;
    assert!(doc["openapi"].as_str().unwrap().starts_with('3'));
    assert!(doc["paths"]["/api/invoices/{id}/balance"].is_object());
}
