use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::profiles::models::{CreateProfileRequest, UpdateProfileRequest};
use crate::modules::profiles::services::ProfileService;

/// Get the caller's profile; `null` when none has been created yet
/// GET /profile
pub async fn get_profile(
    service: web::Data<Arc<ProfileService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let profile = service.get_profile(&ctx).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Create the caller's profile
/// POST /profile
pub async fn create_profile(
    service: web::Data<Arc<ProfileService>>,
    ctx: SessionContext,
    request: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let profile = service.create_profile(&ctx, request).await?;

    Ok(HttpResponse::Created().json(profile))
}

/// Patch the caller's profile
/// PATCH /profile
pub async fn update_profile(
    service: web::Data<Arc<ProfileService>>,
    ctx: SessionContext,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let profile = service.update_profile(&ctx, request).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("", web::get().to(get_profile))
            .route("", web::post().to(create_profile))
            .route("", web::patch().to(update_profile)),
    );
}
