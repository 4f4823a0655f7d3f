use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::{line_item_responses, LineItemResponse, TotalsDisplay};

use super::invoice::{Invoice, InvoiceStatus};

/// Full invoice as returned by create/get/list, client and items populated
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    pub client: ClientSummary,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub totals: TotalsDisplay,
    pub created_at: String,
    pub updated_at: String,
}

impl InvoiceResponse {
    pub fn from_invoice(invoice: &Invoice, client: ClientSummary) -> Self {
        Self {
            id: invoice.id.clone(),
            invoice_number: invoice.invoice_number.clone(),
            client,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            status: invoice.status,
            notes: invoice.notes.clone(),
            terms: invoice.terms.clone(),
            items: line_item_responses(&invoice.items),
            totals: invoice.totals().to_display(),
            created_at: invoice.created_at.to_rfc3339(),
            updated_at: invoice.updated_at.to_rfc3339(),
        }
    }
}

/// Slim shape used when listing a client's documents
#[derive(Debug, Serialize)]
pub struct InvoiceSummary {
    pub id: String,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
}
