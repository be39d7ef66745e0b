use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::{default_page, default_page_size, rules};
use crate::models::Payment;

/// Payload for recording a payment against an invoice.
///
/// When payments come embedded in an invoice creation the rule set still
/// requires an `invoice_id`, but the id of the invoice being created takes
/// precedence over whatever was submitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    pub invoice_id: Uuid,

    #[validate(custom(function = "rules::payment_amount"))]
    #[schema(example = "100.00")]
    pub amount: Decimal,

    #[validate(custom(function = "rules::payment_date"))]
    pub payment_date: NaiveDate,

    #[validate(custom(function = "rules::payment_method"))]
    #[schema(example = "BankTransfer")]
    pub method: String,
}

/// Payload for updating a payment. The owning invoice never changes.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentRequest {
    #[validate(custom(function = "rules::payment_amount"))]
    pub amount: Decimal,

    #[validate(custom(function = "rules::payment_date"))]
    pub payment_date: NaiveDate,

    #[validate(custom(function = "rules::payment_method"))]
    pub method: String,
}

/// Listing window for payments, scoped to one invoice.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentListQuery {
    pub invoice_id: Uuid,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Read view of a payment.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub method: String,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id(),
            invoice_id: payment.invoice_id(),
            amount: payment.amount(),
            payment_date: payment.payment_date(),
            method: payment.method().to_string(),
        }
    }
}
