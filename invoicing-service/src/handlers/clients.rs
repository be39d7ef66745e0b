use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::client::{CreateClientRequest, UpdateClientRequest},
    dtos::Pagination,
    AppState,
};

/// List clients ordered by name
#[utoipa::path(
    get,
    path = "/api/clients",
    params(Pagination),
    responses(
        (status = 200, description = "Page of clients", body = [ClientResponse])
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(window): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let clients = state.clients.get_all(window.page, window.page_size).await?;
    Ok((StatusCode::OK, Json(clients)))
}

/// Get a client by id
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "The client", body = ClientResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.clients.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(client)))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ClientResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.clients.create(req).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = ClientResponse),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.clients.update(id, req).await?;
    Ok((StatusCode::OK, Json(client)))
}

/// Soft-delete a client
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
