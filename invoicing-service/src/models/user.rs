//! User account entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::{required, DomainError};

/// An account that can authenticate against the service. Only the password
/// hash is ever stored.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            username: required(username, "username")?,
            password_hash: required(password_hash, "password_hash")?,
            created_at: Utc::now(),
            updated_at: None,
            is_deleted: false,
        })
    }

    /// Logical removal. Idempotent.
    pub fn mark_as_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Some(Utc::now());
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
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
