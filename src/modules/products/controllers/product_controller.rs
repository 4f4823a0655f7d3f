use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::products::models::CreateProductRequest;
use crate::modules::products::services::ProductService;

/// Create a new product
/// POST /products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    ctx: SessionContext,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let product = service.create_product(&ctx, request).await?;

    Ok(HttpResponse::Created().json(product))
}

/// List products
/// GET /products
pub async fn list_products(
    service: web::Data<Arc<ProductService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let products = service.list_products(&ctx).await?;

    Ok(HttpResponse::Ok().json(products))
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create_product))
            .route("", web::get().to(list_products)),
    );
}
