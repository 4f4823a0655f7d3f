use std::sync::Arc;

use crate::core::pdf::sanitize_filename;
use crate::core::{AppError, Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::clients::models::ClientSummary;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::documents::models::build_line_items;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::profiles::repositories::ProfileRepository;

use super::pdf_renderer;

/// Invoice business logic
pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    clients: Arc<dyn ClientRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        clients: Arc<dyn ClientRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            invoices,
            clients,
            profiles,
        }
    }

    /// Create a new invoice with line items.
    ///
    /// The whole document is persisted in one transaction; a failure leaves
    /// no partial line items behind.
    pub async fn create_invoice(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateInvoiceRequest>,
    ) -> Result<InvoiceResponse> {
        let request = request.into_inner();

        let client = self
            .clients
            .find_by_id(&request.client_id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let items = build_line_items(&request.items)?;

        let invoice = Invoice::new(
            ctx.user_id.clone(),
            client.id.clone(),
            request.invoice_number,
            request.issue_date,
            request.due_date,
            request.notes,
            request.terms,
            items,
        )?;

        self.invoices.create(&invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            grand_total = %invoice.totals().grand_total,
            "invoice created"
        );

        Ok(InvoiceResponse::from_invoice(
            &invoice,
            ClientSummary::from(&client),
        ))
    }

    pub async fn list_invoices(&self, ctx: &SessionContext) -> Result<Vec<InvoiceResponse>> {
        let invoices = self.invoices.list(&ctx.user_id).await?;

        Ok(invoices
            .into_iter()
            .map(|record| InvoiceResponse::from_invoice(&record.invoice, record.client))
            .collect())
    }

    pub async fn get_invoice(&self, ctx: &SessionContext, id: &str) -> Result<InvoiceResponse> {
        let record = self
            .invoices
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        Ok(InvoiceResponse::from_invoice(&record.invoice, record.client))
    }

    /// Move an invoice along its status lifecycle.
    pub async fn update_status(
        &self,
        ctx: &SessionContext,
        id: &str,
        new_status: InvoiceStatus,
    ) -> Result<InvoiceResponse> {
        let mut record = self
            .invoices
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        record.invoice.update_status(new_status)?;
        self.invoices
            .update_status(id, &ctx.user_id, new_status)
            .await?;

        Ok(InvoiceResponse::from_invoice(&record.invoice, record.client))
    }

    /// Render the invoice as a PDF document.
    pub async fn export_pdf(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<(String, Vec<u8>)> {
        let record = self
            .invoices
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        let profile = self.profiles.find_by_user(&ctx.user_id).await?;

        let bytes =
            pdf_renderer::render_invoice(&record.invoice, &record.client, profile.as_ref())?;
        let filename = format!(
            "invoice_{}.pdf",
            sanitize_filename(&record.invoice.invoice_number)
        );

        Ok((filename, bytes))
    }
}
