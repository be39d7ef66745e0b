use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::invoice::{BalanceResponse, CreateInvoiceRequest, UpdateInvoiceRequest},
    dtos::Pagination,
    AppState,
};

/// List invoices ordered by issue date
#[utoipa::path(
    get,
    path = "/api/invoices",
    params(Pagination),
    responses(
        (status = 200, description = "Page of invoices", body = [InvoiceResponse])
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(window): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = state.invoices.get_all(window.page, window.page_size).await?;
    Ok((StatusCode::OK, Json(invoices)))
}

/// Get an invoice by id
#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "The invoice with its payments", body = InvoiceResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(invoice)))
}

/// Create an invoice, optionally with embedded payments
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.create(req).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Update an invoice
#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Invoice updated", body = InvoiceResponse),
        (status = 404, description = "Invoice or client not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.update(id, req).await?;
    Ok((StatusCode::OK, Json(invoice)))
}

/// Soft-delete an invoice
#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.invoices.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Outstanding balance of an invoice
#[utoipa::path(
    get,
    path = "/api/invoices/{id}/balance",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Face amount minus non-deleted payments", body = BalanceResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse)
    ),
    tag = "Invoices",
    security(("bearer_auth" = []))
)]
pub async fn balance_due(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let balance = state.invoices.balance_due(id).await?;
    Ok((
        StatusCode::OK,
        Json(BalanceResponse {
            balance_due: balance,
        }),
    ))
}
