use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::money;

use super::line_item::LineItem;

/// Derived totals for a document. Never persisted; recomputed from line
/// items on every read so the stored rows stay the single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

impl Totals {
    /// Compute totals over an ordered sequence of line items.
    ///
    /// Accumulation stays at full precision; rounding happens only when a
    /// display string is produced. An empty slice yields all zeroes.
    pub fn of(items: &[LineItem]) -> Self {
        let mut subtotal = Decimal::ZERO;
        let mut tax_amount = Decimal::ZERO;

        for item in items {
            let line_total = item.line_total();
            subtotal += line_total;
            tax_amount += line_total * item.tax_rate / Decimal::ONE_HUNDRED;
        }

        Self {
            subtotal,
            tax_amount,
            grand_total: subtotal + tax_amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.grand_total.is_zero()
    }

    /// Two-decimal display form, the only place rounding is applied.
    pub fn to_display(&self) -> TotalsDisplay {
        TotalsDisplay {
            subtotal: money::format_display(self.subtotal),
            tax_amount: money::format_display(self.tax_amount),
            grand_total: money::format_display(self.grand_total),
        }
    }
}

/// Wire form of `Totals`: fixed two-decimal strings
#[derive(Debug, Clone, Serialize)]
pub struct TotalsDisplay {
    pub subtotal: String,
    pub tax_amount: String,
    pub grand_total: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: i32, unit_price: Decimal, tax_rate: Option<Decimal>) -> LineItem {
        LineItem::new("Test item".to_string(), quantity, unit_price, tax_rate, 0).unwrap()
    }

    #[test]
    fn test_empty_sequence_is_all_zero() {
        let totals = Totals::of(&[]);
        assert!(totals.is_zero());

        let display = totals.to_display();
        assert_eq!(display.subtotal, "0.00");
        assert_eq!(display.tax_amount, "0.00");
        assert_eq!(display.grand_total, "0.00");
    }

    #[test]
    fn test_mixed_tax_rates() {
        // 2 × 100 @ 10% plus 1 × 50 untaxed
        let items = vec![
            item(2, dec!(100), Some(dec!(10))),
            item(1, dec!(50), None),
        ];

        let totals = Totals::of(&items);
        assert_eq!(totals.subtotal, dec!(250));
        assert_eq!(totals.tax_amount, dec!(20));
        assert_eq!(totals.grand_total, dec!(270));

        let display = totals.to_display();
        assert_eq!(display.subtotal, "250.00");
        assert_eq!(display.tax_amount, "20.00");
        assert_eq!(display.grand_total, "270.00");
    }

    #[test]
    fn test_no_binary_float_drift() {
        // 3 × 33.33 must come out as 99.99 exactly, not 99.98999...
        let items = vec![item(3, dec!(33.33), None)];

        let totals = Totals::of(&items);
        assert_eq!(totals.grand_total, dec!(99.99));
        assert_eq!(totals.to_display().grand_total, "99.99");
    }

    #[test]
    fn test_rounding_only_at_display() {
        // Three lines of 1 × 0.333 @ 0%: exact sum is 0.999, which rounds to
        // 1.00 at display. Per-line rounding would have given 0.99.
        let items = vec![
            item(1, dec!(0.333), None),
            item(1, dec!(0.333), None),
            item(1, dec!(0.333), None),
        ];

        let totals = Totals::of(&items);
        assert_eq!(totals.subtotal, dec!(0.999));
        assert_eq!(totals.to_display().grand_total, "1.00");
    }

    #[test]
    fn test_grand_total_matches_sum_identity() {
        let items = vec![
            item(7, dec!(19.99), Some(dec!(21))),
            item(3, dec!(5.25), Some(dec!(6))),
            item(1, dec!(1200), None),
        ];

        let totals = Totals::of(&items);
        let expected: Decimal = items.iter().map(|i| i.total_with_tax()).sum();
        assert_eq!(totals.grand_total, expected);
    }
}
