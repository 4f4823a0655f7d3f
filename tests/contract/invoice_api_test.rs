// Contract tests for the invoice API surface.
//
// These pin the JSON shapes: what a create request must look like, what the
// response carries, and the flat error body every failure mode produces.

use actix_web::body::to_bytes;
use actix_web::ResponseError;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;

use facture::core::{AppError, Unvalidated};
use facture::documents::models::LineItem;
use facture::modules::clients::models::ClientSummary;
use facture::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceResponse,
};

fn sample_invoice() -> Invoice {
    Invoice::new(
        "user-1".to_string(),
        "client-1".to_string(),
        "INV-00042".to_string(),
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        Some("Thanks for your business.".to_string()),
        None,
        vec![
            LineItem::new("Consulting".to_string(), 2, dec!(100), Some(dec!(10)), 0).unwrap(),
            LineItem::new("Hosting".to_string(), 1, dec!(50), None, 1).unwrap(),
        ],
    )
    .unwrap()
}

fn sample_client() -> ClientSummary {
    ClientSummary {
        id: "client-1".to_string(),
        name: "Acme Corp".to_string(),
        email: "billing@acme.test".to_string(),
    }
}

#[test]
fn test_create_request_accepts_form_payload() {
    let payload = json!({
        "client_id": "client-1",
        "invoice_number": "INV-00042",
        "issue_date": "2025-07-01",
        "due_date": "2025-08-01",
        "items": [
            {"description": "Consulting", "quantity": 2, "unit_price": "100", "tax_rate": "10"},
            {"description": "Hosting", "quantity": 1, "unit_price": "50"}
        ],
        "notes": "Thanks for your business."
    });

    let request: CreateInvoiceRequest = serde_json::from_value(payload).unwrap();
    let valid = Unvalidated::new(request).validate().unwrap();

    assert_eq!(valid.items.len(), 2);
    assert!(valid.items[1].tax_rate.is_none());
}

#[test]
fn test_invoice_response_shape() {
    let response = InvoiceResponse::from_invoice(&sample_invoice(), sample_client());
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["invoice_number"], "INV-00042");
    assert_eq!(body["status"], "draft");
    assert_eq!(body["client"]["name"], "Acme Corp");
    assert_eq!(body["client"]["email"], "billing@acme.test");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Consulting");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["unit_price"], "100.00");
    assert_eq!(items[0]["tax_rate"], "10.00");
    assert_eq!(items[0]["line_total"], "220.00");

    // 2×100 @ 10% + 1×50 untaxed
    assert_eq!(body["totals"]["subtotal"], "250.00");
    assert_eq!(body["totals"]["tax_amount"], "20.00");
    assert_eq!(body["totals"]["grand_total"], "270.00");

    // The owner never leaks into the response
    assert!(body.get("user_id").is_none());
}

#[test]
fn test_empty_invoice_list_serializes_as_empty_array() {
    let responses: Vec<InvoiceResponse> = Vec::new();
    let body = serde_json::to_value(&responses).unwrap();

    assert!(body.is_array());
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_unauthorized_error_body() {
    let response = AppError::Unauthorized.error_response();
    assert_eq!(response.status(), 401);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[actix_web::test]
async fn test_storage_failure_error_body_is_generic() {
    let err = AppError::db("create invoice")(sqlx::Error::PoolClosed);
    let response = err.error_response();
    assert_eq!(response.status(), 500);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Failed to create invoice"}));
}

#[actix_web::test]
async fn test_validation_error_surfaces_field_message() {
    let response = AppError::validation("Quantity must be at least 1.").error_response();
    assert_eq!(response.status(), 400);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Quantity must be at least 1."}));
}

#[actix_web::test]
async fn test_not_found_error_body() {
    let response = AppError::not_found("Invoice").error_response();
    assert_eq!(response.status(), 404);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Invoice not found"}));
}
