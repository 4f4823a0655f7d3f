use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::{line_item_responses, LineItemResponse, TotalsDisplay};

use super::recurring_invoice::{Frequency, RecurringInvoice};

/// Full recurring-invoice template as returned by create/get/list
#[derive(Debug, Serialize)]
pub struct RecurringInvoiceResponse {
    pub id: String,
    pub name: Option<String>,
    pub client: ClientSummary,
    pub frequency: Frequency,
    pub day_of_month: Option<u32>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub generation_limit: Option<u32>,
    pub payment_terms: String,
    pub auto_send: bool,
    /// Next date an invoice would generate, from today; null once finished
    pub next_generation: Option<NaiveDate>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub totals: TotalsDisplay,
    pub created_at: String,
    pub updated_at: String,
}

impl RecurringInvoiceResponse {
    pub fn from_template(template: &RecurringInvoice, client: ClientSummary) -> Self {
        let today = chrono::Utc::now().date_naive();

        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            client,
            frequency: template.frequency,
            day_of_month: template.day_of_month,
            start_date: template.start_date,
            end_date: template.end_date,
            generation_limit: template.generation_limit,
            payment_terms: template.payment_terms.clone(),
            auto_send: template.auto_send,
            next_generation: template.next_occurrence(today),
            notes: template.notes.clone(),
            terms: template.terms.clone(),
            items: line_item_responses(&template.items),
            totals: template.totals().to_display(),
            created_at: template.created_at.to_rfc3339(),
            updated_at: template.updated_at.to_rfc3339(),
        }
    }
}

/// Slim shape used when listing a client's documents
#[derive(Debug, Serialize)]
pub struct RecurringInvoiceSummary {
    pub id: String,
    pub name: Option<String>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
