use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::reports::models::{ClientRevenue, MonthlyRevenue, StatusBreakdown};

/// Aggregation queries behind the revenue dashboard.
///
/// Every figure is summed from the line items at query time; totals are
/// never read from a cached column.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn revenue_by_status(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<StatusBreakdown>>;

    async fn top_clients(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        limit: u32,
    ) -> Result<Vec<ClientRevenue>>;

    async fn monthly_revenue(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MonthlyRevenue>>;
}

pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn revenue_by_status(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<StatusBreakdown>> {
        retry::read("aggregate revenue by status", || {
            sqlx::query_as::<_, StatusBreakdown>(
                r#"
                SELECT
                    i.status,
                    COUNT(DISTINCT i.id) AS invoice_count,
                    COALESCE(SUM(t.quantity * t.unit_price * (1 + t.tax_rate / 100)), 0)
                        AS revenue
                FROM invoices i
                LEFT JOIN invoice_items t ON t.invoice_id = i.id
                WHERE i.user_id = ? AND i.issue_date BETWEEN ? AND ?
                GROUP BY i.status
                ORDER BY i.status
                "#,
            )
            .bind(user_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
        })
        .await
    }

    async fn top_clients(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        limit: u32,
    ) -> Result<Vec<ClientRevenue>> {
        retry::read("aggregate top clients", || {
            sqlx::query_as::<_, ClientRevenue>(
                r#"
                SELECT
                    c.id AS client_id,
                    c.name,
                    COALESCE(SUM(t.quantity * t.unit_price * (1 + t.tax_rate / 100)), 0)
                        AS revenue
                FROM invoices i
                JOIN clients c ON c.id = i.client_id
                LEFT JOIN invoice_items t ON t.invoice_id = i.id
                WHERE i.user_id = ? AND i.issue_date BETWEEN ? AND ?
                GROUP BY c.id, c.name
                ORDER BY revenue DESC
                LIMIT ?
                "#,
            )
            .bind(user_id)
            .bind(start_date)
            .bind(end_date)
            .bind(limit)
            .fetch_all(&self.pool)
        })
        .await
    }

    async fn monthly_revenue(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<MonthlyRevenue>> {
        retry::read("aggregate monthly revenue", || {
            sqlx::query_as::<_, MonthlyRevenue>(
                r#"
                SELECT
                    DATE_FORMAT(i.issue_date, '%Y-%m') AS month,
                    COALESCE(SUM(t.quantity * t.unit_price * (1 + t.tax_rate / 100)), 0)
                        AS revenue
                FROM invoices i
                LEFT JOIN invoice_items t ON t.invoice_id = i.id
                WHERE i.user_id = ? AND i.issue_date BETWEEN ? AND ?
                GROUP BY month
                ORDER BY month
                "#,
            )
            .bind(user_id)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
        })
        .await
    }
}
