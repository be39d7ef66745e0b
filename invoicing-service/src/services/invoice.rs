//! Invoice orchestration, including balance reads and payments embedded at
//! creation time.

use std::sync::Arc;

use rust_decimal::Decimal;
use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::invoice::{CreateInvoiceRequest, InvoiceResponse, UpdateInvoiceRequest};
use crate::models::{Invoice, Payment};
use crate::store::{ClientStore, InvoiceStore};

#[derive(Clone)]
pub struct InvoiceService {
    invoices: Arc<dyn InvoiceStore>,
    clients: Arc<dyn ClientStore>,
}

impl InvoiceService {
    pub fn new(invoices: Arc<dyn InvoiceStore>, clients: Arc<dyn ClientStore>) -> Self {
        Self { invoices, clients }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<InvoiceResponse, AppError> {
        let invoice = self.require(id).await?;
        Ok(InvoiceResponse::from(&invoice))
    }

    pub async fn get_all(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<InvoiceResponse>, AppError> {
        let invoices = self.invoices.get_all(page, page_size).await?;
        Ok(invoices.iter().map(InvoiceResponse::from).collect())
    }

    /// Creates the invoice after the referenced client resolves. Embedded
    /// payments are attached before the persist so the whole aggregate
    /// commits as one unit of work.
    #[instrument(skip(self, req))]
    pub async fn create(&self, req: CreateInvoiceRequest) -> Result<InvoiceResponse, AppError> {
        req.validate()?;

        self.require_client(req.client_id).await?;

        let mut invoice = Invoice::new(
            req.number,
            req.issue_date,
            req.due_date,
            req.client_id,
            req.amount,
        )?;

        if let Some(payment_reqs) = req.payments {
            for payment_req in payment_reqs {
                // The submitted invoice_id is superseded by the invoice
                // being created.
                let payment = Payment::new(
                    invoice.id(),
                    payment_req.amount,
                    payment_req.payment_date,
                    payment_req.method,
                )?;
                invoice.add_payment(payment);
            }
        }

        self.invoices.add(&invoice).await?;

        info!(
            invoice_id = %invoice.id(),
            payments = invoice.payments().len(),
            "invoice created"
        );
        Ok(InvoiceResponse::from(&invoice))
    }

    #[instrument(skip(self, req))]
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse, AppError> {
        req.validate()?;

        let mut invoice = self.require(id).await?;
        self.require_client(req.client_id).await?;

        invoice.update(
            req.number,
            req.issue_date,
            req.due_date,
            req.client_id,
            req.amount,
        )?;
        self.invoices.update(&invoice).await?;

        Ok(InvoiceResponse::from(&invoice))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut invoice = self.require(id).await?;
        invoice.mark_as_deleted();
        self.invoices.update(&invoice).await?;

        info!(invoice_id = %id, "invoice deleted");
        Ok(())
    }

    /// Face value minus the non-deleted payment total of the invoice.
    pub async fn balance_due(&self, id: Uuid) -> Result<Decimal, AppError> {
        let invoice = self.require(id).await?;
        Ok(invoice.balance_due())
    }

    async fn require(&self, id: Uuid) -> Result<Invoice, AppError> {
        self.invoices
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))
    }

    async fn require_client(&self, id: Uuid) -> Result<(), AppError> {
        self.clients
            .get_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Client not found")))
    }
}
