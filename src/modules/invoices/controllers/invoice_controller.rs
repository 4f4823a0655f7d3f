use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Unvalidated;
use crate::middleware::SessionContext;
use crate::modules::invoices::models::{CreateInvoiceRequest, UpdateInvoiceStatusRequest};
use crate::modules::invoices::services::InvoiceService;

/// Create a new invoice
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    ctx: SessionContext,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let request = Unvalidated::new(request.into_inner()).validate()?;
    let invoice = service.create_invoice(&ctx, request).await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// List invoices, client and line items populated
/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    ctx: SessionContext,
) -> Result<HttpResponse, AppError> {
    let invoices = service.list_invoices(&ctx).await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Get invoice by ID
/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(&ctx, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Change invoice status
/// PATCH /invoices/{id}/status
pub async fn update_status(
    service: web::Data<Arc<InvoiceService>>,
    ctx: SessionContext,
    path: web::Path<String>,
    request: web::Json<UpdateInvoiceStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .update_status(&ctx, &path.into_inner(), request.status)
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Download the invoice as a PDF
/// GET /invoices/{id}/pdf
pub async fn export_pdf(
    service: web::Data<Arc<InvoiceService>>,
    ctx: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = service.export_pdf(&ctx, &path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}/status", web::patch().to(update_status))
            .route("/{id}/pdf", web::get().to(export_pdf)),
    );
}
