//! Domain entities and their invariants.
//!
//! Entities keep their fields private: construction goes through `new`,
//! mutation through the named methods, and deletion is the logical
//! `mark_as_deleted` flag flip. The invariants enforced here hold
//! independently of whatever the request validation layer checks.

mod client;
mod invoice;
mod payment;
mod user;

pub use client::Client;
pub use invoice::Invoice;
pub use payment::Payment;
pub use user::User;

use service_core::error::AppError;
use thiserror::Error;

/// Violation of an entity construction or mutation contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("amount must be non-negative")]
    NegativeAmount,

    #[error("amount must be positive")]
    NonPositiveAmount,
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(anyhow::anyhow!(err))
    }
}

/// Required-text contract shared by the constructors: a field is absent when
/// it is empty or whitespace-only.
fn required(value: String, field: &'static str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(value)
    }
}
