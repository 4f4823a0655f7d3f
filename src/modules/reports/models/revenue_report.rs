use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::core::money;

/// Revenue per invoice status over the reporting period.
///
/// Revenue is computed in SQL from the line items, so the stored rows stay
/// the single source of truth and there is no cached total to drift.
#[derive(Debug, Clone, FromRow)]
pub struct StatusBreakdown {
    pub status: String,
    pub invoice_count: i64,
    pub revenue: Decimal,
}

/// One client's revenue over the reporting period
#[derive(Debug, Clone, FromRow)]
pub struct ClientRevenue {
    pub client_id: String,
    pub name: String,
    pub revenue: Decimal,
}

/// Revenue bucketed by issue month (`YYYY-MM`)
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
}

/// Aggregated revenue figures for a date range
#[derive(Debug, Clone)]
pub struct RevenueReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub by_status: Vec<StatusBreakdown>,
    pub top_clients: Vec<ClientRevenue>,
    pub monthly: Vec<MonthlyRevenue>,
}

impl RevenueReport {
    fn revenue_for(&self, status: &str) -> Decimal {
        self.by_status
            .iter()
            .find(|b| b.status == status)
            .map(|b| b.revenue)
            .unwrap_or(Decimal::ZERO)
    }

    /// Revenue from paid invoices
    pub fn total_revenue(&self) -> Decimal {
        self.revenue_for("paid")
    }

    pub fn pending_revenue(&self) -> Decimal {
        self.revenue_for("pending")
    }

    pub fn overdue_revenue(&self) -> Decimal {
        self.revenue_for("overdue")
    }

    pub fn invoice_count(&self) -> i64 {
        self.by_status.iter().map(|b| b.invoice_count).sum()
    }

    /// Whole-percent share of invoices per status; empty when there are no
    /// invoices in the period.
    pub fn status_shares(&self) -> Vec<StatusShare> {
        let total = self.invoice_count();
        if total == 0 {
            return Vec::new();
        }

        self.by_status
            .iter()
            .map(|b| StatusShare {
                status: b.status.clone(),
                invoice_count: b.invoice_count,
                percent: ((b.invoice_count * 100 + total / 2) / total) as u32,
            })
            .collect()
    }
}

/// Invoice-count share of one status, as shown in the status chart export
#[derive(Debug, Clone, Serialize)]
pub struct StatusShare {
    pub status: String,
    pub invoice_count: i64,
    pub percent: u32,
}

/// Wire form of the revenue report: amounts as fixed two-decimal strings
#[derive(Debug, Serialize)]
pub struct RevenueReportResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_revenue: String,
    pub pending_revenue: String,
    pub overdue_revenue: String,
    pub invoice_count: i64,
    pub status_breakdown: Vec<StatusShare>,
    pub top_clients: Vec<ClientRevenueResponse>,
    pub monthly_revenue: Vec<MonthlyRevenueResponse>,
}

#[derive(Debug, Serialize)]
pub struct ClientRevenueResponse {
    pub client_id: String,
    pub name: String,
    pub revenue: String,
}

#[derive(Debug, Serialize)]
pub struct MonthlyRevenueResponse {
    pub month: String,
    pub revenue: String,
}

impl From<&RevenueReport> for RevenueReportResponse {
    fn from(report: &RevenueReport) -> Self {
        Self {
            start_date: report.start_date,
            end_date: report.end_date,
            total_revenue: money::format_display(report.total_revenue()),
            pending_revenue: money::format_display(report.pending_revenue()),
            overdue_revenue: money::format_display(report.overdue_revenue()),
            invoice_count: report.invoice_count(),
            status_breakdown: report.status_shares(),
            top_clients: report
                .top_clients
                .iter()
                .map(|c| ClientRevenueResponse {
                    client_id: c.client_id.clone(),
                    name: c.name.clone(),
                    revenue: money::format_display(c.revenue),
                })
                .collect(),
            monthly_revenue: report
                .monthly
                .iter()
                .map(|m| MonthlyRevenueResponse {
                    month: m.month.clone(),
                    revenue: money::format_display(m.revenue),
                })
                .collect(),
        }
    }
}
