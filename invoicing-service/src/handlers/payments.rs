use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::payment::{CreatePaymentRequest, PaymentListQuery, UpdatePaymentRequest},
    AppState,
};

/// List an invoice's payments ordered by payment date
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Page of payments", body = [PaymentResponse])
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payments = state
        .payments
        .get_all_by_invoice(query.invoice_id, query.page, query.page_size)
        .await?;
    Ok((StatusCode::OK, Json(payments)))
}

/// Get a payment by id
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "The payment", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payments.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(payment)))
}

/// Record a payment against an invoice
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 404, description = "Invoice not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payments.create(req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Update a payment
#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = PaymentResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payments.update(id, req).await?;
    Ok((StatusCode::OK, Json(payment)))
}

/// Soft-delete a payment
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.payments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
