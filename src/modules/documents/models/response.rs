use serde::Serialize;

use crate::core::money;

use super::line_item::LineItem;

/// Wire form of a line item: decimals rendered as fixed-precision strings,
/// matching how every other amount leaves this API.
#[derive(Debug, Clone, Serialize)]
pub struct LineItemResponse {
    pub id: Option<String>,
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: String,
    pub tax_rate: String,
    pub line_total: String,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            product_id: item.product_id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: money::format_display(item.unit_price),
            tax_rate: money::format_display(item.tax_rate),
            line_total: money::format_display(item.total_with_tax()),
        }
    }
}

pub fn line_item_responses(items: &[LineItem]) -> Vec<LineItemResponse> {
    items.iter().map(LineItemResponse::from).collect()
}
