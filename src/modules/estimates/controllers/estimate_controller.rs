use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::estimates::models::{CreateEstimateRequest, UpdateEstimateStatusRequest};
use crate::modules::estimates::services::EstimateService;

/// Create a new estimate
/// POST /estimates
pub async fn create_estimate(
    service: web::Data<Arc<EstimateService>>,
    ctx: SessionContext,
    request: web::Json<CreateEstimateRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let estimate = service.create_estimate(&ctx, request).await?;

    Ok(HttpResponse::Created().json(estimate))
}

/// List estimates, client and line items populated
/// GET /estimates
pub async fn list_estimates(
    service: web::Data<Arc<EstimateService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let estimates = service.list_estimates(&ctx).await?;

    Ok(HttpResponse::Ok().json(estimates))
}

/// Get estimate by ID
/// GET /estimates/{id}
pub async fn get_estimate(
    service: web::Data<Arc<EstimateService>>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let estimate = service.get_estimate(&ctx, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(estimate))
}

/// Change estimate status
/// PATCH /estimates/{id}/status
pub async fn update_status(
    service: web::Data<Arc<EstimateService>>,
    ctx: SessionContext,
    path: web::Path<String>,
    request: web::Json<UpdateEstimateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let estimate = service
        .update_status(&ctx, &path.into_inner(), request.status)
        .await?;

    Ok(HttpResponse::Ok().json(estimate))
}

/// Configure estimate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/estimates")
            .route("", web::post().to(create_estimate))
            .route("", web::get().to(list_estimates))
            .route("/{id}", web::get().to(get_estimate))
            .route("/{id}/status", web::patch().to(update_status)),
    );
}
