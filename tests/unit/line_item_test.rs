// Line-item construction and per-line arithmetic.
//
// Bounds are enforced when the item is built, before any totals run;
// the calculator itself assumes already-validated input.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use facture::documents::models::{build_line_items, LineItem, LineItemRequest};

#[test]
fn test_line_total_is_quantity_times_price() {
    let item = LineItem::new("Design work".to_string(), 3, dec!(120.50), None, 0).unwrap();

    assert_eq!(item.line_total(), dec!(361.50));
    assert_eq!(item.total_with_tax(), dec!(361.50));
}

#[test]
fn test_tax_is_percentage_of_line_total() {
    let item = LineItem::new("Hosting".to_string(), 2, dec!(100), Some(dec!(10)), 0).unwrap();

    assert_eq!(item.line_total(), dec!(200));
    assert_eq!(item.tax_amount(), dec!(20));
    assert_eq!(item.total_with_tax(), dec!(220));
}

#[test]
fn test_missing_tax_rate_defaults_to_zero_percent() {
    let item = LineItem::new("Support".to_string(), 1, dec!(50), None, 0).unwrap();

    assert_eq!(item.tax_rate, Decimal::ZERO);
    assert_eq!(item.tax_amount(), Decimal::ZERO);
}

#[test]
fn test_fractional_tax_rate() {
    let item = LineItem::new("License".to_string(), 1, dec!(200), Some(dec!(7.5)), 0).unwrap();

    assert_eq!(item.tax_amount(), dec!(15));
}

#[test]
fn test_zero_quantity_rejected_before_calculation() {
    let result = LineItem::new("Widget".to_string(), 0, dec!(10), None, 0);

    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Quantity must be at least 1"));
}

#[test]
fn test_negative_quantity_rejected() {
    assert!(LineItem::new("Widget".to_string(), -3, dec!(10), None, 0).is_err());
}

#[test]
fn test_negative_price_rejected() {
    let result = LineItem::new("Widget".to_string(), 1, dec!(-0.01), None, 0);

    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Price must be at least 0"));
}

#[test]
fn test_zero_price_allowed() {
    let item = LineItem::new("Free sample".to_string(), 5, Decimal::ZERO, None, 0).unwrap();

    assert_eq!(item.line_total(), Decimal::ZERO);
}

#[test]
fn test_tax_rate_bounds() {
    assert!(LineItem::new("Widget".to_string(), 1, dec!(10), Some(dec!(100)), 0).is_ok());
    assert!(LineItem::new("Widget".to_string(), 1, dec!(10), Some(dec!(100.01)), 0).is_err());
    assert!(LineItem::new("Widget".to_string(), 1, dec!(10), Some(dec!(-1)), 0).is_err());
}

#[test]
fn test_description_length_bounds() {
    assert!(LineItem::new("x".to_string(), 1, dec!(10), None, 0).is_err());
    assert!(LineItem::new("ok".to_string(), 1, dec!(10), None, 0).is_ok());
    assert!(LineItem::new("y".repeat(256), 1, dec!(10), None, 0).is_err());
}

#[test]
fn test_build_line_items_assigns_positions_in_order() {
    let requests = vec![
        LineItemRequest {
            product_id: None,
            description: "First".to_string(),
            quantity: 1,
            unit_price: dec!(10),
            tax_rate: None,
        },
        LineItemRequest {
            product_id: Some("prod-7".to_string()),
            description: "Second".to_string(),
            quantity: 2,
            unit_price: dec!(20),
            tax_rate: Some(dec!(5)),
        },
        LineItemRequest {
            product_id: None,
            description: "Third".to_string(),
            quantity: 3,
            unit_price: dec!(30),
            tax_rate: None,
        },
    ];

    let items = build_line_items(&requests).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(
        items.iter().map(|i| i.position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(items[1].product_id.as_deref(), Some("prod-7"));
}

#[test]
fn test_build_line_items_fails_on_any_bad_row() {
    let requests = vec![
        LineItemRequest {
            product_id: None,
            description: "Good row".to_string(),
            quantity: 1,
            unit_price: dec!(10),
            tax_rate: None,
        },
        LineItemRequest {
            product_id: None,
            description: "Bad row".to_string(),
            quantity: 1,
            unit_price: dec!(10),
            tax_rate: Some(dec!(150)),
        },
    ];

    assert!(build_line_items(&requests).is_err());
}
