use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::Result;

use super::line_item::LineItem;

/// One item row as submitted by a create form.
///
/// String lengths and the quantity floor are schema-checked; the decimal
/// bounds (price ≥ 0, tax 0-100) are enforced by `LineItem::new` since the
/// validator derive has no range rule for decimals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LineItemRequest {
    pub product_id: Option<String>,

    #[validate(length(min = 2, message = "Description must be at least 2 characters."))]
    pub description: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1."))]
    pub quantity: i32,

    pub unit_price: Decimal,

    /// Tax percentage (0-100); missing means untaxed
    pub tax_rate: Option<Decimal>,
}

/// Convert submitted rows into validated line items, preserving order.
pub fn build_line_items(items: &[LineItemRequest]) -> Result<Vec<LineItem>> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| {
            let mut line_item = LineItem::new(
                item.description.clone(),
                item.quantity,
                item.unit_price,
                item.tax_rate,
                position as i32,
            )?;
            line_item.product_id = item.product_id.clone();
            Ok(line_item)
        })
        .collect()
}
