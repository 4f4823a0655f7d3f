use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::clients::models::CreateClientRequest;
use crate::modules::clients::services::ClientService;

/// Create a new client
/// POST /clients
pub async fn create_client(
    service: web::Data<Arc<ClientService>>,
    ctx: SessionContext,
    request: web::Json<CreateClientRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let client = service.create_client(&ctx, request).await?;

    Ok(HttpResponse::Created().json(client))
}

/// List clients
/// GET /clients
pub async fn list_clients(
    service: web::Data<Arc<ClientService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let clients = service.list_clients(&ctx).await?;

    Ok(HttpResponse::Ok().json(clients))
}

/// Get a client with its documents
/// GET /clients/{id}
pub async fn get_client(
    service: web::Data<Arc<ClientService>>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = service.get_client(&ctx, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(client))
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(create_client))
            .route("", web::get().to(list_clients))
            .route("/{id}", web::get().to(get_client)),
    );
}
