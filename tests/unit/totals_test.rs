// Property-based tests for document totals.
//
// The accumulation invariant: the grand total always equals the decimal sum
// of quantity × unit_price × (1 + tax_rate/100) over all items, with
// rounding applied only when a display string is produced.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use facture::documents::models::{LineItem, Totals};

fn item(quantity: i32, unit_price: Decimal, tax_rate: Option<Decimal>) -> LineItem {
    LineItem::new("Test item".to_string(), quantity, unit_price, tax_rate, 0).unwrap()
}

#[test]
fn test_empty_sequence_yields_zero_totals() {
    let totals = Totals::of(&[]);

    assert_eq!(totals.subtotal, Decimal::ZERO);
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, Decimal::ZERO);

    let display = totals.to_display();
    assert_eq!(display.subtotal, "0.00");
    assert_eq!(display.tax_amount, "0.00");
    assert_eq!(display.grand_total, "0.00");
}

#[test]
fn test_mixed_tax_example() {
    // 2 × 100 @ 10% plus 1 × 50 untaxed → 250.00 / 20.00 / 270.00
    let items = vec![
        item(2, dec!(100), Some(dec!(10))),
        item(1, dec!(50), None),
    ];

    let totals = Totals::of(&items);
    assert_eq!(totals.subtotal, dec!(250));
    assert_eq!(totals.tax_amount, dec!(20));
    assert_eq!(totals.grand_total, dec!(270));
    assert_eq!(totals.to_display().grand_total, "270.00");
}

#[test]
fn test_repeating_cents_do_not_drift() {
    // 3 × 33.33 is exactly 99.99 in decimal; binary floats would have
    // produced 99.98999999...
    let items = vec![item(3, dec!(33.33), None)];

    let totals = Totals::of(&items);
    assert_eq!(totals.grand_total, dec!(99.99));
    assert_eq!(totals.to_display().grand_total, "99.99");
}

#[test]
fn test_missing_tax_defaults_to_zero() {
    let items = vec![item(4, dec!(25), None)];

    let totals = Totals::of(&items);
    assert_eq!(totals.subtotal, dec!(100));
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, dec!(100));
}

#[test]
fn test_rounding_happens_only_at_display() {
    // Exact sum 0.999 rounds to 1.00 at display; rounding each line first
    // would have given 0.99.
    let items = vec![
        item(1, dec!(0.333), None),
        item(1, dec!(0.333), None),
        item(1, dec!(0.333), None),
    ];

    let totals = Totals::of(&items);
    assert_eq!(totals.subtotal, dec!(0.999));
    assert_eq!(totals.to_display().grand_total, "1.00");
}

proptest! {
    #[test]
    fn test_grand_total_matches_sum_identity(
        lines in prop::collection::vec(
            (1i32..1_000, 0i64..10_000_000i64, 0u8..=100u8),
            1..25,
        )
    ) {
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(quantity, price_cents, tax_percent)| {
                item(
                    quantity,
                    Decimal::new(price_cents, 2),
                    Some(Decimal::from(tax_percent)),
                )
            })
            .collect();

        let totals = Totals::of(&items);

        let expected_subtotal: Decimal = items.iter().map(|i| i.line_total()).sum();
        let expected_tax: Decimal = items.iter().map(|i| i.tax_amount()).sum();

        prop_assert_eq!(totals.subtotal, expected_subtotal);
        prop_assert_eq!(totals.tax_amount, expected_tax);
        prop_assert_eq!(totals.grand_total, expected_subtotal + expected_tax);
    }

    #[test]
    fn test_totals_are_deterministic(
        lines in prop::collection::vec(
            (1i32..1_000, 0i64..10_000_000i64, 0u8..=100u8),
            1..25,
        )
    ) {
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(quantity, price_cents, tax_percent)| {
                item(
                    quantity,
                    Decimal::new(price_cents, 2),
                    Some(Decimal::from(tax_percent)),
                )
            })
            .collect();

        prop_assert_eq!(Totals::of(&items).grand_total, Totals::of(&items).grand_total);
    }

    #[test]
    fn test_tax_never_exceeds_subtotal(
        lines in prop::collection::vec(
            (1i32..1_000, 0i64..10_000_000i64, 0u8..=100u8),
            1..25,
        )
    ) {
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(quantity, price_cents, tax_percent)| {
                item(
                    quantity,
                    Decimal::new(price_cents, 2),
                    Some(Decimal::from(tax_percent)),
                )
            })
            .collect();

        let totals = Totals::of(&items);

        // Rates cap at 100%, so tax can never outgrow the subtotal
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
        prop_assert!(totals.tax_amount <= totals.subtotal);
        prop_assert!(totals.grand_total >= totals.subtotal);
    }

    #[test]
    fn test_display_has_exactly_two_decimals(
        lines in prop::collection::vec(
            (1i32..1_000, 0i64..10_000_000i64, 0u8..=100u8),
            1..25,
        )
    ) {
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(quantity, price_cents, tax_percent)| {
                item(
                    quantity,
                    Decimal::new(price_cents, 2),
                    Some(Decimal::from(tax_percent)),
                )
            })
            .collect();

        let display = Totals::of(&items).to_display();

        for value in [&display.subtotal, &display.tax_amount, &display.grand_total] {
            let (_, decimals) = value.split_once('.').expect("missing decimal point");
            prop_assert_eq!(decimals.len(), 2, "expected two decimals in {}", value);
        }
    }

    #[test]
    fn test_untaxed_items_leave_tax_at_zero(
        lines in prop::collection::vec(
            (1i32..1_000, 0i64..10_000_000i64),
            1..25,
        )
    ) {
        let items: Vec<LineItem> = lines
            .iter()
            .map(|&(quantity, price_cents)| item(quantity, Decimal::new(price_cents, 2), None))
            .collect();

        let totals = Totals::of(&items);

        prop_assert_eq!(totals.tax_amount, Decimal::ZERO);
        prop_assert_eq!(totals.grand_total, totals.subtotal);
    }
}
