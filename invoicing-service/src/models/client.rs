//! Client entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{required, DomainError};

/// A billable customer. Owns its invoices by back-reference only; nothing on
/// the client ever mutates an invoice.
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    id: Uuid,
    name: String,
    email: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl Client {
    pub fn new(name: String, email: String, address: String) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: required(name, "name")?,
            email: required(email, "email")?,
            address: required(address, "address")?,
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
        })
    }

    /// Replace the mutable fields. No format checks here; those belong to the
    /// request validation layer.
    pub fn update(
        &mut self,
        name: String,
        email: String,
        address: String,
    ) -> Result<(), DomainError> {
        self.name = required(name, "name")?;
        self.email = required(email, "email")?;
        self.address = required(address, "address")?;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Logical removal. Idempotent.
    pub fn mark_as_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Some(Utc::now());
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
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
