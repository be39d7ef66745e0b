//! Shared fixtures for the integration tests: in-memory store
//! implementations and service wiring.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use invoicing_service::dtos::client::{ClientResponse, CreateClientRequest};
use invoicing_service::models::{Client, Invoice, Payment, User};
use invoicing_service::services::JwtService;
use invoicing_service::store::{ClientStore, InvoiceStore, PaymentStore, UserStore};
use invoicing_service::AppState;
use rust_decimal::Decimal;
use service_core::error::AppError;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-signing-key";
pub const TEST_ISSUER: &str = "InvoiceManagementAPI";

/// In-memory stand-in for the Postgres stores. Reads apply the same
/// soft-delete filter and ordering as the SQL views; rows are never
/// physically removed.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    clients: HashMap<Uuid, Client>,
    invoices: HashMap<Uuid, Invoice>,
    payments: HashMap<Uuid, Payment>,
    users: HashMap<Uuid, User>,
}

impl MemoryStore {
    /// Physical row counts, soft-deleted rows included.
    pub fn client_rows(&self) -> usize {
        self.inner.lock().unwrap().clients.len()
    }

    pub fn invoice_rows(&self) -> usize {
        self.inner.lock().unwrap().invoices.len()
    }

    pub fn payment_rows(&self) -> usize {
        self.inner.lock().unwrap().payments.len()
    }
}

fn page_slice<T>(items: Vec<T>, page: u32, page_size: u32) -> Vec<T> {
    let start = (page.max(1) as usize - 1) * page_size as usize;
    items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}

fn payments_for(inner: &Inner, invoice_id: Uuid) -> Vec<Payment> {
    let mut payments: Vec<Payment> = inner
        .payments
        .values()
        .filter(|p| p.invoice_id() == invoice_id && !p.is_deleted())
        .cloned()
        .collect();
    payments.sort_by_key(|p| p.payment_date());
    payments
}

#[async_trait]
impl ClientStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clients.get(&id).filter(|c| !c.is_deleted()).cloned())
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Client>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut clients: Vec<Client> = inner
            .clients
            .values()
            .filter(|c| !c.is_deleted())
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(page_slice(clients, page, page_size))
    }

    async fn add(&self, client: &Client) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.clients.insert(client.id(), client.clone());
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Invoice>, AppError> {
        let inner = self.inner.lock().unwrap();
        let Some(invoice) = inner.invoices.get(&id).filter(|i| !i.is_deleted()) else {
            return Ok(None);
        };
        let mut invoice = invoice.clone();
        invoice.attach_payments(payments_for(&inner, id));
        Ok(Some(invoice))
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Invoice>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut invoices: Vec<Invoice> = inner
            .invoices
            .values()
            .filter(|i| !i.is_deleted())
            .cloned()
            .collect();
        invoices.sort_by_key(|i| i.issue_date());
        let mut paged = page_slice(invoices, page, page_size);
        for invoice in &mut paged {
            let payments = payments_for(&inner, invoice.id());
            invoice.attach_payments(payments);
        }
        Ok(paged)
    }

    async fn add(&self, invoice: &Invoice) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        for payment in invoice.payments() {
            inner.payments.insert(payment.id(), payment.clone());
        }
        inner.invoices.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.invoices.insert(invoice.id(), invoice.clone());
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.payments.get(&id).filter(|p| !p.is_deleted()).cloned())
    }

    async fn get_all_by_invoice(
        &self,
        invoice_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Payment>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(page_slice(payments_for(&inner, invoice_id), page, page_size))
    }

    async fn add_to_invoice(&self, invoice: &Invoice, payment: &Payment) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.payments.insert(payment.id(), payment.clone());
        inner.invoices.insert(invoice.id(), invoice.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.payments.insert(payment.id(), payment.clone());
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| u.username() == username && !u.is_deleted())
            .cloned())
    }

    async fn add(&self, user: &User) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        // Mirrors the unique index on username.
        if inner
            .users
            .values()
            .any(|u| u.username() == user.username() && !u.is_deleted())
        {
            return Err(AppError::Conflict(anyhow::anyhow!("Username already exists")));
        }
        inner.users.insert(user.id(), user.clone());
        Ok(())
    }
}

/// Services wired over one shared in-memory store.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let jwt = JwtService::new(TEST_JWT_SECRET, TEST_ISSUER, TEST_ISSUER);
        let state = AppState::with_stores(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            jwt,
        );
        Self { state, store }
    }

    pub async fn seed_client(&self) -> ClientResponse {
        self.state
            .clients
            .create(CreateClientRequest {
                name: "Acme Corp".to_string(),
                email: "billing@acme.example".to_string(),
                address: "1 Industrial Way".to_string(),
            })
            .await
            .expect("failed to seed client")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
