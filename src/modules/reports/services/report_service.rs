use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::{AppError, Result};
use crate::middleware::SessionContext;
use crate::modules::reports::models::{RevenueReport, RevenueReportResponse};
use crate::modules::reports::repositories::ReportRepository;

use super::report_pdf;

/// Longest reporting period accepted, in days (inclusive range)
const MAX_RANGE_DAYS: i64 = 366;

/// How many clients the top-clients table shows
const TOP_CLIENT_LIMIT: u32 = 5;

/// Revenue dashboard aggregation
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    pub async fn revenue_report(
        &self,
        ctx: &SessionContext,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RevenueReportResponse> {
        let report = self.generate(ctx, start_date, end_date).await?;
        Ok(RevenueReportResponse::from(&report))
    }

    /// Render the report as the key-value PDF table the dashboard exports.
    pub async fn revenue_report_pdf(
        &self,
        ctx: &SessionContext,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(String, Vec<u8>)> {
        let report = self.generate(ctx, start_date, end_date).await?;
        let bytes = report_pdf::render_revenue_report(&report)?;
        let filename = format!("revenue_{}_{}.pdf", report.start_date, report.end_date);

        Ok((filename, bytes))
    }

    async fn generate(
        &self,
        ctx: &SessionContext,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RevenueReport> {
        validate_range(start_date, end_date)?;

        let by_status = self
            .reports
            .revenue_by_status(&ctx.user_id, start_date, end_date)
            .await?;
        let top_clients = self
            .reports
            .top_clients(&ctx.user_id, start_date, end_date, TOP_CLIENT_LIMIT)
            .await?;
        let monthly = self
            .reports
            .monthly_revenue(&ctx.user_id, start_date, end_date)
            .await?;

        tracing::debug!(
            %start_date,
            %end_date,
            statuses = by_status.len(),
            "revenue report generated"
        );

        Ok(RevenueReport {
            start_date,
            end_date,
            by_status,
            top_clients,
            monthly,
        })
    }
}

fn validate_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if start_date > end_date {
        return Err(AppError::validation(
            "Start date must be on or before the end date.",
        ));
    }

    let days = (end_date - start_date).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(AppError::validation(format!(
            "Date range too large: {} days (maximum {}).",
            days, MAX_RANGE_DAYS
        )));
    }

    Ok(())
}
