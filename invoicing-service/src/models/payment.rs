//! Payment entity.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{required, DomainError};

/// A payment recorded against an invoice. The amount is strictly positive,
/// enforced here regardless of what the validation layer checked.
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    id: Uuid,
    invoice_id: Uuid,
    amount: Decimal,
    payment_date: NaiveDate,
    method: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Payment {
    pub fn new(
        invoice_id: Uuid,
        amount: Decimal,
        payment_date: NaiveDate,
        method: String,
    ) -> Result<Self, DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            invoice_id,
            amount,
            payment_date,
            method: required(method, "method")?,
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
        })
    }

    pub fn update(
        &mut self,
        amount: Decimal,
        payment_date: NaiveDate,
        method: String,
    ) -> Result<(), DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount);
        }
        self.amount = amount;
        self.payment_date = payment_date;
        self.method = required(method, "method")?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Logical removal. Idempotent; the owning invoice is not touched.
    pub fn mark_as_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Some(Utc::now());
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn invoice_id(&self) -> Uuid {
        self.invoice_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}
