use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::{money, AppError, Result};

/// A catalog product that can be picked onto document line items
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    /// Default tax percentage applied when the product is picked (0-100)
    pub tax_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        user_id: String,
        name: String,
        description: Option<String>,
        unit_price: Decimal,
        tax_rate: Option<Decimal>,
    ) -> Result<Self> {
        let tax_rate = tax_rate.unwrap_or(Decimal::ZERO);

        if unit_price < Decimal::ZERO {
            return Err(AppError::validation("Price must be at least 0."));
        }
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation("Tax rate must be between 0 and 100."));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            description,
            unit_price,
            tax_rate,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 2, message = "Product name must be at least 2 characters."))]
    pub name: String,

    pub description: Option<String>,

    pub unit_price: Decimal,

    /// Default tax percentage (0-100); missing means untaxed
    pub tax_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: String,
    pub tax_rate: String,
    pub created_at: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: money::format_display(product.unit_price),
            tax_rate: money::format_display(product.tax_rate),
            created_at: product.created_at.to_rfc3339(),
        }
    }
}
