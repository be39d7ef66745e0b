//! invoicing-service: clients, invoices, payments, and the users who manage
//! them.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use secrecy::ExposeSecret;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::config::Config;
use crate::services::{AuthService, ClientService, InvoiceService, JwtService, PaymentService};
use crate::store::{ClientStore, Database, InvoiceStore, PaymentStore, UserStore};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::clients::list,
        handlers::clients::get_by_id,
        handlers::clients::create,
        handlers::clients::update,
        handlers::clients::delete,
        handlers::invoices::list,
        handlers::invoices::get_by_id,
        handlers::invoices::create,
        handlers::invoices::update,
        handlers::invoices::delete,
        handlers::invoices::balance_due,
        handlers::payments::list,
        handlers::payments::get_by_id,
        handlers::payments::create,
        handlers::payments::update,
        handlers::payments::delete,
    ),
    components(schemas(
        dtos::ErrorResponse,
        dtos::MessageResponse,
        dtos::auth::LoginRequest,
        dtos::auth::RegisterRequest,
        dtos::auth::TokenResponse,
        dtos::client::CreateClientRequest,
        dtos::client::UpdateClientRequest,
        dtos::client::ClientResponse,
        dtos::invoice::CreateInvoiceRequest,
        dtos::invoice::UpdateInvoiceRequest,
        dtos::invoice::InvoiceResponse,
        dtos::invoice::BalanceResponse,
        dtos::payment::CreatePaymentRequest,
        dtos::payment::UpdatePaymentRequest,
        dtos::payment::PaymentResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Login and registration"),
        (name = "Clients", description = "Client management"),
        (name = "Invoices", description = "Invoice management and balances"),
        (name = "Payments", description = "Payment management"),
        (name = "Observability", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Shared per-request state: the orchestration services plus the token
/// service the auth middleware checks against.
#[derive(Clone)]
pub struct AppState {
    pub clients: ClientService,
    pub invoices: InvoiceService,
    pub payments: PaymentService,
    pub auth: AuthService,
    pub jwt: JwtService,
}

impl AppState {
    /// Wire the services over the Postgres-backed stores.
    pub fn new(config: &Config, db: Database) -> Self {
        let jwt = JwtService::new(
            config.jwt.secret.expose_secret(),
            &config.jwt.issuer,
            &config.jwt.audience,
        );
        let store = Arc::new(db);
        Self::with_stores(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            jwt,
        )
    }

    /// Wire the services over explicit store implementations.
    pub fn with_stores(
        clients: Arc<dyn ClientStore>,
        invoices: Arc<dyn InvoiceStore>,
        payments: Arc<dyn PaymentStore>,
        users: Arc<dyn UserStore>,
        jwt: JwtService,
    ) -> Self {
        Self {
            clients: ClientService::new(clients.clone()),
            invoices: InvoiceService::new(invoices.clone(), clients),
            payments: PaymentService::new(payments, invoices),
            auth: AuthService::new(users, jwt.clone()),
            jwt,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/clients",
            get(handlers::clients::list).post(handlers::clients::create),
        )
        .route(
            "/api/clients/:id",
            get(handlers::clients::get_by_id)
                .put(handlers::clients::update)
                .delete(handlers::clients::delete),
        )
        .route(
            "/api/invoices",
            get(handlers::invoices::list).post(handlers::invoices::create),
        )
        .route(
            "/api/invoices/:id",
            get(handlers::invoices::get_by_id)
                .put(handlers::invoices::update)
                .delete(handlers::invoices::delete),
        )
        .route(
            "/api/invoices/:id/balance",
            get(handlers::invoices::balance_due),
        )
        .route(
            "/api/payments",
            get(handlers::payments::list).post(handlers::payments::create),
        )
        .route(
            "/api/payments/:id",
            get(handlers::payments::get_by_id)
                .put(handlers::payments::update)
                .delete(handlers::payments::delete),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", post(handlers::auth::register))
        .route("/api/users/login", post(handlers::auth::login))
        .route("/api-docs/openapi.json", get(openapi))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Service liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy")),
    tag = "Observability"
)]
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
