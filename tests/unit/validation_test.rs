// Request-DTO schema validation at the submission boundary.
//
// Bad quantities, short names, and missing items are rejected here, before
// a service or the totals calculator ever sees the request.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use facture::core::Unvalidated;
use facture::modules::auth::models::{LoginRequest, RegisterRequest};
use facture::modules::clients::models::CreateClientRequest;
use facture::modules::invoices::models::CreateInvoiceRequest;
use facture::modules::products::models::CreateProductRequest;
use facture::modules::recurring::models::CreateRecurringInvoiceRequest;

fn invoice_payload(items: serde_json::Value) -> serde_json::Value {
    json!({
        "client_id": "client-1",
        "invoice_number": "INV-00042",
        "issue_date": "2025-07-01",
        "due_date": "2025-08-01",
        "items": items
    })
}

fn parse_invoice(payload: serde_json::Value) -> CreateInvoiceRequest {
    serde_json::from_value(payload).unwrap()
}

#[test]
fn test_valid_invoice_request_passes() {
    let request = parse_invoice(invoice_payload(json!([
        {"description": "Consulting", "quantity": 2, "unit_price": "500", "tax_rate": "10"}
    ])));

    let valid = Unvalidated::new(request).validate().unwrap();
    assert_eq!(valid.invoice_number, "INV-00042");
    assert_eq!(valid.issue_date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
}

#[test]
fn test_empty_items_rejected() {
    let request = parse_invoice(invoice_payload(json!([])));

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("At least one item is required"));
}

#[test]
fn test_zero_quantity_rejected_by_schema() {
    let request = parse_invoice(invoice_payload(json!([
        {"description": "Consulting", "quantity": 0, "unit_price": "500"}
    ])));

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("Quantity must be at least 1"));
}

#[test]
fn test_short_item_description_rejected() {
    let request = parse_invoice(invoice_payload(json!([
        {"description": "x", "quantity": 1, "unit_price": "10"}
    ])));

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("at least 2 characters"));
}

#[test]
fn test_short_invoice_number_rejected() {
    let request = parse_invoice(json!({
        "client_id": "client-1",
        "invoice_number": "I-1",
        "issue_date": "2025-07-01",
        "due_date": "2025-08-01",
        "items": [{"description": "Consulting", "quantity": 1, "unit_price": "10"}]
    }));

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("at least 5 characters"));
}

#[test]
fn test_missing_tax_rate_deserializes_without_error() {
    let request = parse_invoice(invoice_payload(json!([
        {"description": "Consulting", "quantity": 1, "unit_price": "10"}
    ])));

    let valid = Unvalidated::new(request).validate().unwrap();
    assert!(valid.items[0].tax_rate.is_none());
}

#[test]
fn test_client_name_min_length() {
    let request = CreateClientRequest {
        name: "A".to_string(),
        email: "billing@acme.test".to_string(),
        address: None,
        phone: None,
    };

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("at least 2 characters"));
}

#[test]
fn test_client_email_format() {
    let request = CreateClientRequest {
        name: "Acme".to_string(),
        email: "not-an-email".to_string(),
        address: None,
        phone: None,
    };

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("Invalid email address"));
}

#[test]
fn test_product_name_min_length() {
    let request = CreateProductRequest {
        name: "P".to_string(),
        description: None,
        unit_price: dec!(10),
        tax_rate: None,
    };

    assert!(Unvalidated::new(request).validate().is_err());
}

#[test]
fn test_register_password_min_length() {
    let request = RegisterRequest {
        email: "a@b.test".to_string(),
        password: "short".to_string(),
    };

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("at least 8 characters"));
}

#[test]
fn test_login_requires_password() {
    let request = LoginRequest {
        email: "a@b.test".to_string(),
        password: String::new(),
    };

    assert!(Unvalidated::new(request).validate().is_err());
}

#[test]
fn test_recurring_day_of_month_range() {
    let request: CreateRecurringInvoiceRequest = serde_json::from_value(json!({
        "client_id": "client-1",
        "frequency": "monthly",
        "day_of_month": 32,
        "start_date": "2025-07-01",
        "items": [{"description": "Retainer", "quantity": 1, "unit_price": "1000"}]
    }))
    .unwrap();

    let err = Unvalidated::new(request).validate().unwrap_err();
    assert!(err.to_string().contains("between 1 and 31"));
}

#[test]
fn test_recurring_defaults_auto_send_off() {
    let request: CreateRecurringInvoiceRequest = serde_json::from_value(json!({
        "client_id": "client-1",
        "frequency": "weekly",
        "start_date": "2025-07-01",
        "items": [{"description": "Retainer", "quantity": 1, "unit_price": "1000"}]
    }))
    .unwrap();

    let valid = Unvalidated::new(request).validate().unwrap();
    assert!(!valid.auto_send);
}
