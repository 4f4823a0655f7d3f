use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::{AppError, Result};
use crate::modules::documents::models::{LineItem, LineItemRequest, Totals};

/// Estimate lifecycle: drafted, sent to the client, then answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
}

impl Default for EstimateStatus {
    fn default() -> Self {
        EstimateStatus::Draft
    }
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateStatus::Draft => write!(f, "draft"),
            EstimateStatus::Sent => write!(f, "sent"),
            EstimateStatus::Accepted => write!(f, "accepted"),
            EstimateStatus::Declined => write!(f, "declined"),
        }
    }
}

impl std::str::FromStr for EstimateStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EstimateStatus::Draft),
            "sent" => Ok(EstimateStatus::Sent),
            "accepted" => Ok(EstimateStatus::Accepted),
            "declined" => Ok(EstimateStatus::Declined),
            _ => Err(format!("Invalid estimate status: {}", s)),
        }
    }
}

/// An estimate with its ordered line items
#[derive(Debug, Clone)]
pub struct Estimate {
    pub id: String,
    pub user_id: String,
    pub client_id: String,
    pub estimate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: EstimateStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

impl Estimate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        client_id: String,
        estimate_number: String,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
        notes: Option<String>,
        items: Vec<LineItem>,
    ) -> Result<Self> {
        if estimate_number.trim().len() < 5 {
            return Err(AppError::validation(
                "Estimate number must be at least 5 characters.",
            ));
        }
        if items.is_empty() {
            return Err(AppError::validation("At least one item is required."));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            client_id,
            estimate_number,
            issue_date,
            expiry_date,
            status: EstimateStatus::Draft,
            notes,
            created_at: now,
            updated_at: now,
            items,
        })
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.items)
    }

    /// Draft goes out as sent; only a sent estimate can be answered.
    pub fn update_status(&mut self, new_status: EstimateStatus) -> Result<()> {
        let allowed = matches!(
            (self.status, new_status),
            (EstimateStatus::Draft, EstimateStatus::Sent)
                | (EstimateStatus::Sent, EstimateStatus::Accepted)
                | (EstimateStatus::Sent, EstimateStatus::Declined)
        );

        if !allowed && self.status != new_status {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                self.status, new_status
            )));
        }

        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEstimateRequest {
    #[validate(length(min = 1, message = "Client is required."))]
    pub client_id: String,

    #[validate(length(min = 5, message = "Estimate number must be at least 5 characters."))]
    pub estimate_number: String,

    pub issue_date: NaiveDate,

    pub expiry_date: NaiveDate,

    #[validate(length(min = 1, message = "At least one item is required."))]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEstimateStatusRequest {
    pub status: EstimateStatus,
}
