use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::SessionContext;
use crate::modules::reports::services::ReportService;

/// Reporting period, both bounds inclusive
#[derive(Debug, Deserialize)]
pub struct RevenueReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Revenue figures for the dashboard
/// GET /reports/revenue?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
pub async fn revenue_report(
    service: web::Data<Arc<ReportService>>,
    ctx: SessionContext,
    query: web::Query<RevenueReportQuery>,
) -> Result<HttpResponse, AppError> {
    let report = service
        .revenue_report(&ctx, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Download the revenue report as a PDF
/// GET /reports/revenue/pdf
pub async fn revenue_report_pdf(
    service: web::Data<Arc<ReportService>>,
    ctx: SessionContext,
    query: web::Query<RevenueReportQuery>,
) -> Result<HttpResponse, AppError> {
    let (filename, bytes) = service
        .revenue_report_pdf(&ctx, query.start_date, query.end_date)
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/revenue", web::get().to(revenue_report))
            .route("/revenue/pdf", web::get().to(revenue_report_pdf)),
    );
}
