//! Payment orchestration. Creating a payment refreshes the owning invoice's
//! derived total in the same unit of work.

use std::sync::Arc;

use service_core::error::AppError;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::dtos::payment::{CreatePaymentRequest, PaymentResponse, UpdatePaymentRequest};
use crate::models::Payment;
use crate::store::{InvoiceStore, PaymentStore};

#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
    invoices: Arc<dyn InvoiceStore>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentStore>, invoices: Arc<dyn InvoiceStore>) -> Self {
        Self { payments, invoices }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PaymentResponse, AppError> {
        let payment = self.require(id).await?;
        Ok(PaymentResponse::from(&payment))
    }

    pub async fn get_all_by_invoice(
        &self,
        invoice_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<PaymentResponse>, AppError> {
        let payments = self
            .payments
            .get_all_by_invoice(invoice_id, page, page_size)
            .await?;
        Ok(payments.iter().map(PaymentResponse::from).collect())
    }

    #[instrument(skip(self, req))]
    pub async fn create(&self, req: CreatePaymentRequest) -> Result<PaymentResponse, AppError> {
        req.validate()?;

        let mut invoice = self
            .invoices
            .get_by_id(req.invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;

        let payment = Payment::new(req.invoice_id, req.amount, req.payment_date, req.method)?;
        invoice.add_payment(payment.clone());

        self.payments.add_to_invoice(&invoice, &payment).await?;

        info!(
            payment_id = %payment.id(),
            invoice_id = %invoice.id(),
            "payment recorded"
        );
        Ok(PaymentResponse::from(&payment))
    }

    #[instrument(skip(self, req))]
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdatePaymentRequest,
    ) -> Result<PaymentResponse, AppError> {
        req.validate()?;

        let mut payment = self.require(id).await?;
        payment.update(req.amount, req.payment_date, req.method)?;
        self.payments.update(&payment).await?;

        Ok(PaymentResponse::from(&payment))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut payment = self.require(id).await?;
        payment.mark_as_deleted();
        self.payments.update(&payment).await?;

        info!(payment_id = %id, "payment deleted");
        Ok(())
    }

    async fn require(&self, id: Uuid) -> Result<Payment, AppError> {
        self.payments
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Payment not found")))
    }
}
