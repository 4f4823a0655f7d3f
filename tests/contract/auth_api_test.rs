// Contract tests for the auth API surface: request/response shapes and the
// deliberately uniform login failure body.

use actix_web::body::to_bytes;
use actix_web::ResponseError;
use serde_json::json;

use facture::core::{AppError, Unvalidated};
use facture::modules::auth::models::{
    AuthResponse, LoginRequest, RegisterRequest, User, UserResponse,
};

#[test]
fn test_register_request_schema() {
    let payload = json!({
        "email": "owner@studio.test",
        "password": "correct horse battery"
    });

    let request: RegisterRequest = serde_json::from_value(payload).unwrap();
    let valid = Unvalidated::new(request).validate().unwrap();

    assert_eq!(valid.email, "owner@studio.test");
}

#[test]
fn test_register_rejects_malformed_email() {
    let request: RegisterRequest = serde_json::from_value(json!({
        "email": "not-an-email",
        "password": "correct horse battery"
    }))
    .unwrap();

    assert!(Unvalidated::new(request).validate().is_err());
}

#[test]
fn test_login_request_schema() {
    let request: LoginRequest = serde_json::from_value(json!({
        "email": "owner@studio.test",
        "password": "hunter22"
    }))
    .unwrap();

    assert!(Unvalidated::new(request).validate().is_ok());
}

#[test]
fn test_auth_response_shape() {
    let user = User::new("owner@studio.test".to_string(), "$argon2id$...".to_string());
    let response = AuthResponse {
        token: "raw-bearer-token".to_string(),
        expires_at: "2025-08-06T12:00:00+00:00".to_string(),
        user: UserResponse::from(&user),
    };

    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["token"], "raw-bearer-token");
    assert!(body["expires_at"].is_string());
    assert_eq!(body["user"]["email"], "owner@studio.test");
    assert!(body["user"]["id"].is_string());

    // The hash must never appear anywhere in the payload
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[actix_web::test]
async fn test_invalid_credentials_body_is_uniform() {
    // Unknown email and wrong password both map to the same error value,
    // so the response cannot reveal which credential was at fault.
    let response = AppError::InvalidCredentials.error_response();
    assert_eq!(response.status(), 401);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Invalid credentials"}));
}

#[actix_web::test]
async fn test_rate_limited_body() {
    let response = AppError::RateLimited.error_response();
    assert_eq!(response.status(), 429);

    let bytes = to_bytes(response.into_body()).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"error": "Too many requests"}));
}
