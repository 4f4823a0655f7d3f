use std::sync::Arc;

use crate::core::{AppError, Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::clients::models::ClientSummary;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::documents::models::build_line_items;
use crate::modules::recurring::models::{
    CreateRecurringInvoiceRequest, RecurringInvoice, RecurringInvoiceResponse,
};
use crate::modules::recurring::repositories::RecurringInvoiceRepository;

/// Recurring-invoice template management
pub struct RecurringInvoiceService {
    templates: Arc<dyn RecurringInvoiceRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl RecurringInvoiceService {
    pub fn new(
        templates: Arc<dyn RecurringInvoiceRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self { templates, clients }
    }

    pub async fn create_template(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateRecurringInvoiceRequest>,
    ) -> Result<RecurringInvoiceResponse> {
        let request = request.into_inner();

        let client = self
            .clients
            .find_by_id(&request.client_id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client"))?;

        let items = build_line_items(&request.items)?;

        let template = RecurringInvoice::new(
            ctx.user_id.clone(),
            client.id.clone(),
            request.name,
            request.frequency,
            request.day_of_month,
            request.start_date,
            request.end_date,
            request.generation_limit,
            request.payment_terms,
            request.auto_send,
            request.notes,
            request.terms,
            items,
        )?;

        self.templates.create(&template).await?;

        tracing::info!(
            recurring_id = %template.id,
            frequency = %template.frequency,
            "recurring invoice created"
        );

        Ok(RecurringInvoiceResponse::from_template(
            &template,
            ClientSummary::from(&client),
        ))
    }

    pub async fn list_templates(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<RecurringInvoiceResponse>> {
        let templates = self.templates.list(&ctx.user_id).await?;

        Ok(templates
            .into_iter()
            .map(|record| RecurringInvoiceResponse::from_template(&record.template, record.client))
            .collect())
    }

    pub async fn get_template(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<RecurringInvoiceResponse> {
        let record = self
            .templates
            .find_by_id(id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recurring invoice"))?;

        Ok(RecurringInvoiceResponse::from_template(
            &record.template,
            record.client,
        ))
    }
}
