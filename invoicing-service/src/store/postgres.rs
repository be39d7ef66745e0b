//! Postgres-backed store implementations.
//!
//! Reads go through the `active_*` views created by the migration, so the
//! soft-delete filter lives in exactly one place. Writes hit the base tables
//! and wrap multi-row changes in a transaction.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{page_window, ClientStore, InvoiceStore, PaymentStore, UserStore};
use crate::models::{Client, Invoice, Payment, User};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Non-deleted payments for a set of invoices, grouped by invoice id.
    async fn payments_by_invoice(
        &self,
        invoice_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Payment>>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, invoice_id, amount, payment_date, method, created_at, updated_at, is_deleted
            FROM active_payments
            WHERE invoice_id = ANY($1)
            ORDER BY payment_date
            "#,
        )
        .bind(invoice_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Payment>> = HashMap::new();
        for payment in payments {
            grouped.entry(payment.invoice_id()).or_default().push(payment);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ClientStore for Database {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, address, created_at, updated_at, is_deleted
            FROM active_clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Client>, AppError> {
        let (limit, offset) = page_window(page, page_size);
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, address, created_at, updated_at, is_deleted
            FROM active_clients
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn add(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, address, created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(client.id())
        .bind(client.name())
        .bind(client.email())
        .bind(client.address())
        .bind(client.created_at())
        .bind(client.updated_at())
        .bind(client.is_deleted())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = $2, email = $3, address = $4, updated_at = $5, is_deleted = $6
            WHERE id = $1
            "#,
        )
        .bind(client.id())
        .bind(client.name())
        .bind(client.email())
        .bind(client.address())
        .bind(client.updated_at())
        .bind(client.is_deleted())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for Database {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, number, issue_date, due_date, client_id, amount, total_amount,
                   created_at, updated_at, is_deleted
            FROM active_invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut invoice) = invoice else {
            return Ok(None);
        };

        let mut grouped = self.payments_by_invoice(&[id]).await?;
        invoice.attach_payments(grouped.remove(&id).unwrap_or_default());
        Ok(Some(invoice))
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Invoice>, AppError> {
        let (limit, offset) = page_window(page, page_size);
        let mut invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, number, issue_date, due_date, client_id, amount, total_amount,
                   created_at, updated_at, is_deleted
            FROM active_invoices
            ORDER BY issue_date
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        if invoices.is_empty() {
            return Ok(invoices);
        }

        let ids: Vec<Uuid> = invoices.iter().map(Invoice::id).collect();
        let mut grouped = self.payments_by_invoice(&ids).await?;
        for invoice in &mut invoices {
            invoice.attach_payments(grouped.remove(&invoice.id()).unwrap_or_default());
        }
        Ok(invoices)
    }

    async fn add(&self, invoice: &Invoice) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, number, issue_date, due_date, client_id, amount,
                                  total_amount, created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(invoice.id())
        .bind(invoice.number())
        .bind(invoice.issue_date())
        .bind(invoice.due_date())
        .bind(invoice.client_id())
        .bind(invoice.amount())
        .bind(invoice.total_amount())
        .bind(invoice.created_at())
        .bind(invoice.updated_at())
        .bind(invoice.is_deleted())
        .execute(&mut *tx)
        .await?;

        for payment in invoice.payments() {
            sqlx::query(
                r#"
                INSERT INTO payments (id, invoice_id, amount, payment_date, method,
                                      created_at, updated_at, is_deleted)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(payment.id())
            .bind(payment.invoice_id())
            .bind(payment.amount())
            .bind(payment.payment_date())
            .bind(payment.method())
            .bind(payment.created_at())
            .bind(payment.updated_at())
            .bind(payment.is_deleted())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET number = $2, issue_date = $3, due_date = $4, client_id = $5, amount = $6,
                total_amount = $7, updated_at = $8, is_deleted = $9
            WHERE id = $1
            "#,
        )
        .bind(invoice.id())
        .bind(invoice.number())
        .bind(invoice.issue_date())
        .bind(invoice.due_date())
        .bind(invoice.client_id())
        .bind(invoice.amount())
        .bind(invoice.total_amount())
        .bind(invoice.updated_at())
        .bind(invoice.is_deleted())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for Database {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, invoice_id, amount, payment_date, method, created_at, updated_at, is_deleted
            FROM active_payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payment)
    }

    async fn get_all_by_invoice(
        &self,
        invoice_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Payment>, AppError> {
        let (limit, offset) = page_window(page, page_size);
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, invoice_id, amount, payment_date, method, created_at, updated_at, is_deleted
            FROM active_payments
            WHERE invoice_id = $1
            ORDER BY payment_date
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(invoice_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    async fn add_to_invoice(&self, invoice: &Invoice, payment: &Payment) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO payments (id, invoice_id, amount, payment_date, method,
                                  created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id())
        .bind(payment.invoice_id())
        .bind(payment.amount())
        .bind(payment.payment_date())
        .bind(payment.method())
        .bind(payment.created_at())
        .bind(payment.updated_at())
        .bind(payment.is_deleted())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE invoices
            SET total_amount = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(invoice.id())
        .bind(invoice.total_amount())
        .bind(invoice.updated_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE payments
            SET amount = $2, payment_date = $3, method = $4, updated_at = $5, is_deleted = $6
            WHERE id = $1
            "#,
        )
        .bind(payment.id())
        .bind(payment.amount())
        .bind(payment.payment_date())
        .bind(payment.method())
        .bind(payment.updated_at())
        .bind(payment.is_deleted())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for Database {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at, is_deleted
            FROM active_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn add(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id())
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.created_at())
        .bind(user.updated_at())
        .bind(user.is_deleted())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Username already exists"))
            }
            _ => AppError::from(e),
        })?;
        Ok(())
    }
}
