use serde::Serialize;

use crate::modules::estimates::models::EstimateSummary;
use crate::modules::invoices::models::InvoiceSummary;
use crate::modules::recurring::models::RecurringInvoiceSummary;

use super::client::Client;

/// A client together with every document billed to it, the shape the
/// client detail screen works from.
#[derive(Debug, Serialize)]
pub struct ClientDetailResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub invoices: Vec<InvoiceSummary>,
    pub estimates: Vec<EstimateSummary>,
    pub recurring_invoices: Vec<RecurringInvoiceSummary>,
    pub created_at: String,
    pub updated_at: String,
}

impl ClientDetailResponse {
    pub fn new(
        client: Client,
        invoices: Vec<InvoiceSummary>,
        estimates: Vec<EstimateSummary>,
        recurring_invoices: Vec<RecurringInvoiceSummary>,
    ) -> Self {
        Self {
            id: client.id,
            name: client.name,
            email: client.email,
            address: client.address,
            phone: client.phone,
            invoices,
            estimates,
            recurring_invoices,
            created_at: client.created_at.to_rfc3339(),
            updated_at: client.updated_at.to_rfc3339(),
        }
    }
}
