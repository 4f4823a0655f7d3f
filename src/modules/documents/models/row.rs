use rust_decimal::Decimal;

use super::line_item::LineItem;

/// Database row shape shared by the invoice_items, estimate_items, and
/// recurring_items tables.
#[derive(Debug, sqlx::FromRow)]
pub struct ItemRow {
    pub id: String,
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
    pub position: i32,
}

impl ItemRow {
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: Some(self.id),
            product_id: self.product_id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            tax_rate: self.tax_rate,
            position: self.position,
        }
    }
}
