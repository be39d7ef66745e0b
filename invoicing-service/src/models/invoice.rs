//! Invoice aggregate root.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{required, DomainError, Payment};

/// An invoice and the payments recorded against it. The invoice exclusively
/// owns the aggregation over its payments: `total_amount` is the sum of the
/// non-deleted payment amounts and is recomputed in full on every mutation,
/// never maintained incrementally.
#[derive(Debug, Clone, FromRow)]
pub struct Invoice {
    id: Uuid,
    number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    client_id: Uuid,
    amount: Decimal,
    total_amount: Decimal,
    #[sqlx(skip)]
    payments: Vec<Payment>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Invoice {
    /// The due date is deliberately unconstrained here; ordering against the
    /// issue date is a request-validation concern.
    pub fn new(
        number: String,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        client_id: Uuid,
        amount: Decimal,
    ) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::NegativeAmount);
        }
        let mut invoice = Self {
            id: Uuid::new_v4(),
            number: required(number, "number")?,
            issue_date,
            due_date,
            client_id,
            amount,
            total_amount: Decimal::ZERO,
            payments: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
        };
        invoice.recompute_total();
        Ok(invoice)
    }

    /// Attach a payment and refresh the derived total.
    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
        self.recompute_total();
        self.updated_at = Some(Utc::now());
    }

    pub fn update(
        &mut self,
        number: String,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        client_id: Uuid,
        amount: Decimal,
    ) -> Result<(), DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::NegativeAmount);
        }
        self.number = required(number, "number")?;
        self.issue_date = issue_date;
        self.due_date = due_date;
        self.client_id = client_id;
        self.amount = amount;
        self.recompute_total();
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Face value minus the non-deleted payment total. Negative on
    /// overpayment; never clamped.
    pub fn balance_due(&self) -> Decimal {
        self.amount - self.total_amount
    }

    /// Logical removal. Idempotent; does not cascade to the payments.
    pub fn mark_as_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Some(Utc::now());
    }

    /// Rehydration seam for store implementations: replaces the payment
    /// collection with the rows loaded for this invoice and refreshes the
    /// derived total without counting as a mutation.
    pub fn attach_payments(&mut self, payments: Vec<Payment>) {
        self.payments = payments;
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_amount = self
            .payments
            .iter()
            .filter(|p| !p.is_deleted())
            .map(Payment::amount)
            .sum();
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn client_id(&self) -> Uuid {
        self.client_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
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
