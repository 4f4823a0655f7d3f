use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

/// Liveness probe
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "facture"
    }))
}

/// Readiness probe; verifies the database answers
/// GET /ready
pub async fn readiness_check(pool: web::Data<MySqlPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ready"
        })),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unavailable"
            }))
        }
    }
}

/// Service banner
/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Facture Invoicing API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Configure health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
