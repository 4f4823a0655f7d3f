use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::{RateLimiter, SessionContext};
use crate::modules::auth::models::{LoginRequest, RegisterRequest};
use crate::modules::auth::services::AuthService;

/// Register a new account
/// POST /auth/register
pub async fn register(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let response = service.register(request).await?;

    Ok(HttpResponse::Created().json(response))
}

/// Log in with email and password
/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AuthService>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let response = service.login(request).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// End the current session
/// POST /auth/logout
pub async fn logout(
    service: web::Data<Arc<AuthService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    service.logout(&ctx).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Current account
/// GET /auth/me
pub async fn me(
    service: web::Data<Arc<AuthService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let user = service.current_user(&ctx).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Configure auth routes; login and register sit behind the brute-force
/// limiter.
pub fn configure(login_rate_limit_per_minute: u32) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .wrap(RateLimiter::per_minute(login_rate_limit_per_minute))
                .route("/register", web::post().to(register))
                .route("/login", web::post().to(login))
                .route("/logout", web::post().to(logout))
                .route("/me", web::get().to(me)),
        );
    }
}
