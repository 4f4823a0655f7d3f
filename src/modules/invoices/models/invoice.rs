use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::{AppError, Result};
use crate::modules::documents::models::{LineItem, LineItemRequest, Totals};

/// Invoice status lifecycle, as shown in the invoice list's status selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created but not yet sent to the client
    Draft,
    /// Sent, awaiting payment
    Pending,
    /// Payment received
    Paid,
    /// Past its due date without payment
    Overdue,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "draft"),
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// An invoice with its ordered line items
#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: String,
    pub user_id: String,
    pub client_id: String,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Create a new draft invoice with validation.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        client_id: String,
        invoice_number: String,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        notes: Option<String>,
        terms: Option<String>,
        items: Vec<LineItem>,
    ) -> Result<Self> {
        Self::validate_number(&invoice_number)?;
        Self::validate_items(&items)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            client_id,
            invoice_number,
            issue_date,
            due_date,
            status: InvoiceStatus::Draft,
            notes,
            terms,
            created_at: now,
            updated_at: now,
            items,
        })
    }

    /// Derived totals; never read from storage.
    pub fn totals(&self) -> Totals {
        Totals::of(&self.items)
    }

    /// Update status along the allowed lifecycle edges.
    ///
    /// Draft and pending move between each other, pending can settle or
    /// lapse, overdue can still settle. Paid is terminal.
    pub fn update_status(&mut self, new_status: InvoiceStatus) -> Result<()> {
        let allowed = matches!(
            (self.status, new_status),
            (InvoiceStatus::Draft, InvoiceStatus::Pending)
                | (InvoiceStatus::Pending, InvoiceStatus::Draft)
                | (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Overdue)
                | (InvoiceStatus::Overdue, InvoiceStatus::Paid)
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

    fn validate_number(invoice_number: &str) -> Result<()> {
        if invoice_number.trim().len() < 5 {
            return Err(AppError::validation(
                "Invoice number must be at least 5 characters.",
            ));
        }

        Ok(())
    }

    fn validate_items(items: &[LineItem]) -> Result<()> {
        if items.is_empty() {
            return Err(AppError::validation("At least one item is required."));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, message = "Client is required."))]
    pub client_id: String,

    #[validate(length(min = 5, message = "Invoice number must be at least 5 characters."))]
    pub invoice_number: String,

    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    #[validate(length(min = 1, message = "At least one item is required."))]
    #[validate(nested)]
    pub items: Vec<LineItemRequest>,

    pub notes: Option<String>,

    pub terms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn test_items() -> Vec<LineItem> {
        vec![LineItem::new("Consulting".to_string(), 2, dec!(500), Some(dec!(10)), 0).unwrap()]
    }

    fn test_invoice() -> Invoice {
        Invoice::new(
            "user-1".to_string(),
            "client-1".to_string(),
            "INV-00042".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            None,
            None,
            test_items(),
        )
        .unwrap()
    }

    #[test]
    fn test_invoice_creation_starts_as_draft() {
        let invoice = test_invoice();
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.totals().grand_total, dec!(1100));
    }

    #[test]
    fn test_invoice_requires_items() {
        let result = Invoice::new(
            "user-1".to_string(),
            "client-1".to_string(),
            "INV-00042".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            None,
            None,
            vec![],
        );

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("At least one item is required"));
    }

    #[test]
    fn test_invoice_number_min_length() {
        let result = Invoice::new(
            "user-1".to_string(),
            "client-1".to_string(),
            "I-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
            None,
            None,
            test_items(),
        );

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at least 5 characters"));
    }

    #[test]
    fn test_status_transitions_valid() {
        let mut invoice = test_invoice();

        invoice.update_status(InvoiceStatus::Pending).unwrap();
        invoice.update_status(InvoiceStatus::Overdue).unwrap();
        invoice.update_status(InvoiceStatus::Paid).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_paid_is_terminal() {
        let mut invoice = test_invoice();
        invoice.update_status(InvoiceStatus::Pending).unwrap();
        invoice.update_status(InvoiceStatus::Paid).unwrap();

        let result = invoice.update_status(InvoiceStatus::Draft);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid status transition"));
    }

    #[test]
    fn test_draft_cannot_skip_to_paid() {
        let mut invoice = test_invoice();
        assert!(invoice.update_status(InvoiceStatus::Paid).is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Pending,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            assert_eq!(InvoiceStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }
}
