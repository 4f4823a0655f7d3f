use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::recurring::models::CreateRecurringInvoiceRequest;
use crate::modules::recurring::services::RecurringInvoiceService;

/// Create a new recurring-invoice template
/// POST /recurring-invoices
pub async fn create_recurring_invoice(
    service: web::Data<Arc<RecurringInvoiceService>>,
    ctx: SessionContext,
    request: web::Json<CreateRecurringInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let template = service.create_template(&ctx, request).await?;

    Ok(HttpResponse::Created().json(template))
}

/// List recurring-invoice templates
/// GET /recurring-invoices
pub async fn list_recurring_invoices(
    service: web::Data<Arc<RecurringInvoiceService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let templates = service.list_templates(&ctx).await?;

    Ok(HttpResponse::Ok().json(templates))
}

/// Get a recurring-invoice template by ID
/// GET /recurring-invoices/{id}
pub async fn get_recurring_invoice(
    service: web::Data<Arc<RecurringInvoiceService>>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template = service.get_template(&ctx, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(template))
}

/// Configure recurring-invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recurring-invoices")
            .route("", web::post().to(create_recurring_invoice))
            .route("", web::get().to(list_recurring_invoices))
            .route("/{id}", web::get().to(get_recurring_invoice)),
    );
}
