//! Persistence boundary.
//!
//! One async trait per aggregate plus the Postgres implementation. Reads are
//! filtered views over soft-deleted rows; every write call commits one unit
//! of work.

mod postgres;

pub use postgres::Database;

use async_trait::async_trait;
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::{Client, Invoice, Payment, User};

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError>;

    /// Page of non-deleted clients ordered by name. Pages are 1-indexed.
    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Client>, AppError>;

    async fn add(&self, client: &Client) -> Result<(), AppError>;

    async fn update(&self, client: &Client) -> Result<(), AppError>;
}

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Loads the invoice with its non-deleted payments attached.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError>;

    /// Page of non-deleted invoices ordered by issue date, payments attached.
    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Invoice>, AppError>;

    /// Persists the invoice together with any payments already attached to
    /// it, as a single transaction.
    async fn add(&self, invoice: &Invoice) -> Result<(), AppError>;

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError>;

    /// Page of an invoice's non-deleted payments ordered by payment date.
    async fn get_all_by_invoice(
        &self,
        invoice_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Payment>, AppError>;

    /// Persists the payment and the invoice's refreshed totals as a single
    /// transaction.
    async fn add_to_invoice(&self, invoice: &Invoice, payment: &Payment) -> Result<(), AppError>;

    async fn update(&self, payment: &Payment) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-sensitive lookup; soft-deleted accounts are excluded.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts the user; a duplicate username maps to a conflict.
    async fn add(&self, user: &User) -> Result<(), AppError>;
}

/// LIMIT/OFFSET window for a 1-indexed page. Page 0 behaves like page 1.
pub(crate) fn page_window(page: u32, page_size: u32) -> (i64, i64) {
    let page = page.max(1) as i64;
    (page_size as i64, (page - 1) * page_size as i64)
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn page_window_is_one_indexed() {
        assert_eq!(page_window(1, 10), (10, 0));
        assert_eq!(page_window(3, 10), (10, 20));
        assert_eq!(page_window(0, 10), (10, 0));
    }
}
