//! Field validation rules shared by the request payloads.
//!
//! Each function is one field's ordered rule list: predicates checked in
//! order, the first violated one producing that rule's message. `validator`
//! evaluates every field eagerly and aggregates the results, so a caller
//! sees all violations at once rather than the first failure.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::{ValidateEmail, ValidationError};

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn client_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Name is required"));
    }
    if value.chars().count() > 100 {
        return Err(violation("length", "Name cannot exceed 100 characters"));
    }
    Ok(())
}

pub fn client_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Email is required"));
    }
    if !value.validate_email() {
        return Err(violation("email", "Invalid email format"));
    }
    Ok(())
}

pub fn client_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Address is required"));
    }
    if value.chars().count() > 200 {
        return Err(violation("length", "Address cannot exceed 200 characters"));
    }
    Ok(())
}

pub fn invoice_number(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Invoice number is required"));
    }
    if value.chars().count() > 50 {
        return Err(violation(
            "length",
            "Invoice number cannot exceed 50 characters",
        ));
    }
    Ok(())
}

pub fn issue_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        return Err(violation("future", "Issue date cannot be in the future"));
    }
    Ok(())
}

pub fn invoice_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(violation("range", "Amount must be non-negative"));
    }
    Ok(())
}

pub fn payment_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(violation("range", "Amount must be positive"));
    }
    Ok(())
}

pub fn payment_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        return Err(violation("future", "Payment date cannot be in the future"));
    }
    Ok(())
}

pub fn payment_method(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Payment method is required"));
    }
    if value.chars().count() > 50 {
        return Err(violation(
            "length",
            "Payment method cannot exceed 50 characters",
        ));
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("required", "Username is required"));
    }
    if value.chars().count() > 50 {
        return Err(violation("length", "Username cannot exceed 50 characters"));
    }
    Ok(())
}

/// Cross-field rule used at the payload level on invoice writes.
pub fn dates_in_order(issue: NaiveDate, due: NaiveDate) -> Result<(), ValidationError> {
    if due < issue {
        return Err(violation(
            "date_order",
            "Due date must be on or after issue date",
        ));
    }
    Ok(())
}
