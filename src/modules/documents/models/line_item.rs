use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// One row of an invoice, estimate, or recurring-invoice template.
///
/// Line items are owned by their parent document and carry no lifecycle of
/// their own. `tax_rate` is a percentage (0-100); a missing rate means no
/// tax on that line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Optional catalog product this line was picked from
    pub product_id: Option<String>,

    pub description: String,

    pub quantity: i32,

    pub unit_price: Decimal,

    /// Tax percentage for this line (0-100)
    pub tax_rate: Decimal,

    /// Display order within the parent document
    #[serde(skip_deserializing)]
    pub position: i32,
}

impl LineItem {
    /// Create a new line item with validation.
    ///
    /// A missing `tax_rate` defaults to 0%. Quantity and price bounds are
    /// enforced here, before any totals arithmetic runs.
    pub fn new(
        description: String,
        quantity: i32,
        unit_price: Decimal,
        tax_rate: Option<Decimal>,
        position: i32,
    ) -> Result<Self> {
        let tax_rate = tax_rate.unwrap_or(Decimal::ZERO);

        Self::validate_description(&description)?;
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(unit_price)?;
        Self::validate_tax_rate(tax_rate)?;

        Ok(Self {
            id: None,
            product_id: None,
            description,
            quantity,
            unit_price,
            tax_rate,
            position,
        })
    }

    /// quantity × unit price, at full precision
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// Tax owed on this line, at full precision
    pub fn tax_amount(&self) -> Decimal {
        self.line_total() * self.tax_rate / Decimal::ONE_HUNDRED
    }

    /// Line total including tax, at full precision
    pub fn total_with_tax(&self) -> Decimal {
        self.line_total() + self.tax_amount()
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().len() < 2 {
            return Err(AppError::validation(
                "Description must be at least 2 characters.",
            ));
        }

        if description.len() > 255 {
            return Err(AppError::validation(
                "Description cannot exceed 255 characters.",
            ));
        }

        Ok(())
    }

    fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1."));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation("Price must be at least 0."));
        }

        Ok(())
    }

    fn validate_tax_rate(tax_rate: Decimal) -> Result<()> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(
                "Tax rate must be between 0 and 100.",
            ));
        }

        Ok(())
    }
}
