use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::{line_item_responses, LineItemResponse, TotalsDisplay};

use super::estimate::{Estimate, EstimateStatus};

/// Full estimate as returned by create/get/list, client and items populated
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub id: String,
    pub estimate_number: String,
    pub client: ClientSummary,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: EstimateStatus,
    pub notes: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub totals: TotalsDisplay,
    pub created_at: String,
    pub updated_at: String,
}

impl EstimateResponse {
    pub fn from_estimate(estimate: &Estimate, client: ClientSummary) -> Self {
        Self {
            id: estimate.id.clone(),
            estimate_number: estimate.estimate_number.clone(),
            client,
            issue_date: estimate.issue_date,
            expiry_date: estimate.expiry_date,
            status: estimate.status,
            notes: estimate.notes.clone(),
            items: line_item_responses(&estimate.items),
            totals: estimate.totals().to_display(),
            created_at: estimate.created_at.to_rfc3339(),
            updated_at: estimate.updated_at.to_rfc3339(),
        }
    }
}

/// Slim shape used when listing a client's documents
#[derive(Debug, Serialize)]
pub struct EstimateSummary {
    pub id: String,
    pub estimate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: EstimateStatus,
}
