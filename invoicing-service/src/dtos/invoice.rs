use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::dtos::payment::{CreatePaymentRequest, PaymentResponse};
use crate::dtos::rules;
use crate::models::Invoice;

/// Payload for creating an invoice, optionally with payments to record in
/// the same operation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "create_dates_in_order", skip_on_field_errors = false))]
pub struct CreateInvoiceRequest {
    #[validate(custom(function = "rules::invoice_number"))]
    #[schema(example = "INV-001")]
    pub number: String,

    #[validate(custom(function = "rules::issue_date"))]
    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    pub client_id: Uuid,

    #[validate(custom(function = "rules::invoice_amount"))]
    #[schema(example = "500.00")]
    pub amount: Decimal,

    #[validate(nested)]
    pub payments: Option<Vec<CreatePaymentRequest>>,
}

fn create_dates_in_order(req: &CreateInvoiceRequest) -> Result<(), ValidationError> {
    rules::dates_in_order(req.issue_date, req.due_date)
}

/// Payload for updating an invoice. Re-pointing `client_id` at a different
/// client is allowed, with or without recorded payments.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "update_dates_in_order", skip_on_field_errors = false))]
pub struct UpdateInvoiceRequest {
    #[validate(custom(function = "rules::invoice_number"))]
    pub number: String,

    #[validate(custom(function = "rules::issue_date"))]
    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    pub client_id: Uuid,

    #[validate(custom(function = "rules::invoice_amount"))]
    pub amount: Decimal,
}

fn update_dates_in_order(req: &UpdateInvoiceRequest) -> Result<(), ValidationError> {
    rules::dates_in_order(req.issue_date, req.due_date)
}

/// Read view of an invoice with its non-deleted payments.
#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub client_id: Uuid,
    pub amount: Decimal,
    pub total_amount: Decimal,
    pub payments: Vec<PaymentResponse>,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id(),
            number: invoice.number().to_string(),
            issue_date: invoice.issue_date(),
            due_date: invoice.due_date(),
            client_id: invoice.client_id(),
            amount: invoice.amount(),
            total_amount: invoice.total_amount(),
            payments: invoice.payments().iter().map(PaymentResponse::from).collect(),
        }
    }
}

/// Balance read view for an invoice.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub balance_due: Decimal,
}
