use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{retry, AppError, Result};
use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::ItemRow;
use crate::modules::estimates::models::{Estimate, EstimateStatus, EstimateSummary};

/// Estimate joined with the client it was prepared for, items populated
pub struct EstimateWithClient {
    pub estimate: Estimate,
    pub client: ClientSummary,
}

#[async_trait]
pub trait EstimateRepository: Send + Sync {
    /// Insert the estimate and its line items in one transaction.
    async fn create(&self, estimate: &Estimate) -> Result<()>;
    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<EstimateWithClient>>;
    async fn list(&self, user_id: &str) -> Result<Vec<EstimateWithClient>>;
    async fn list_by_client(&self, client_id: &str, user_id: &str)
        -> Result<Vec<EstimateSummary>>;
    async fn update_status(
        &self,
        id: &str,
        user_id: &str,
        status: EstimateStatus,
    ) -> Result<()>;
}

pub struct MySqlEstimateRepository {
    pool: MySqlPool,
}

impl MySqlEstimateRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, estimate_id: &str) -> Result<Vec<ItemRow>> {
        retry::read("fetch estimate items", || {
            sqlx::query_as::<_, ItemRow>(
                r#"
                SELECT id, product_id, description, quantity, unit_price, tax_rate, position
                FROM estimate_items
                WHERE estimate_id = ?
                ORDER BY position
                "#,
            )
            .bind(estimate_id)
            .fetch_all(&self.pool)
        })
        .await
    }
}

#[async_trait]
impl EstimateRepository for MySqlEstimateRepository {
    async fn create(&self, estimate: &Estimate) -> Result<()> {
        let result = retry::write("create estimate", async {
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO estimates (
                    id, user_id, client_id, estimate_number, issue_date, expiry_date,
                    status, notes, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&estimate.id)
            .bind(&estimate.user_id)
            .bind(&estimate.client_id)
            .bind(&estimate.estimate_number)
            .bind(estimate.issue_date)
            .bind(estimate.expiry_date)
            .bind(estimate.status.to_string())
            .bind(&estimate.notes)
            .bind(estimate.created_at)
            .bind(estimate.updated_at)
            .execute(&mut *tx)
            .await?;

            for item in &estimate.items {
                sqlx::query(
                    r#"
                    INSERT INTO estimate_items (
                        id, estimate_id, product_id, description, quantity,
                        unit_price, tax_rate, position
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&estimate.id)
                .bind(&item.product_id)
                .bind(&item.description)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.tax_rate)
                .bind(item.position)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        })
        .await;

        match result {
            Err(AppError::Persistence { source, .. })
                if source
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation()) =>
            {
                Err(AppError::validation(format!(
                    "Estimate number '{}' already exists.",
                    estimate.estimate_number
                )))
            }
            other => other,
        }
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<EstimateWithClient>> {
        let row = retry::read("fetch estimate", || {
            sqlx::query_as::<_, EstimateRow>(
                r#"
                SELECT
                    e.id, e.user_id, e.client_id, e.estimate_number, e.issue_date,
                    e.expiry_date, e.status, e.notes, e.created_at, e.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM estimates e
                JOIN clients c ON c.id = e.client_id
                WHERE e.id = ? AND e.user_id = ?
                LIMIT 1
                "#,
            )
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
        })
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.fetch_items(&row.id).await?;
        Ok(Some(row.into_estimate_with_client(items)?))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<EstimateWithClient>> {
        let rows = retry::read("list estimates", || {
            sqlx::query_as::<_, EstimateRow>(
                r#"
                SELECT
                    e.id, e.user_id, e.client_id, e.estimate_number, e.issue_date,
                    e.expiry_date, e.status, e.notes, e.created_at, e.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM estimates e
                JOIN clients c ON c.id = e.client_id
                WHERE e.user_id = ?
                ORDER BY e.created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await?;

        let mut estimates = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.fetch_items(&row.id).await?;
            estimates.push(row.into_estimate_with_client(items)?);
        }

        Ok(estimates)
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        user_id: &str,
    ) -> Result<Vec<EstimateSummary>> {
        let rows = retry::read("list client estimates", || {
            sqlx::query_as::<_, SummaryRow>(
                r#"
                SELECT id, estimate_number, issue_date, expiry_date, status
                FROM estimates
                WHERE client_id = ? AND user_id = ?
                ORDER BY issue_date DESC
                "#,
            )
            .bind(client_id)
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        user_id: &str,
        status: EstimateStatus,
    ) -> Result<()> {
        let result = retry::write("update estimate status", async {
            sqlx::query(
                r#"
                UPDATE estimates
                SET status = ?, updated_at = ?
                WHERE id = ? AND user_id = ?
                "#,
            )
            .bind(status.to_string())
            .bind(chrono::Utc::now())
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Estimate"));
        }

        Ok(())
    }
}

// Database mapping

#[derive(Debug, sqlx::FromRow)]
struct EstimateRow {
    id: String,
    user_id: String,
    client_id: String,
    estimate_number: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
    status: String,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    client_name: String,
    client_email: String,
}

impl EstimateRow {
    fn into_estimate_with_client(self, item_rows: Vec<ItemRow>) -> Result<EstimateWithClient> {
        let status = EstimateStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;

        let client = ClientSummary {
            id: self.client_id.clone(),
            name: self.client_name,
            email: self.client_email,
        };

        Ok(EstimateWithClient {
            estimate: Estimate {
                id: self.id,
                user_id: self.user_id,
                client_id: self.client_id,
                estimate_number: self.estimate_number,
                issue_date: self.issue_date,
                expiry_date: self.expiry_date,
                status,
                notes: self.notes,
                created_at: self.created_at,
                updated_at: self.updated_at,
                items: item_rows.into_iter().map(ItemRow::into_line_item).collect(),
            },
            client,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: String,
    estimate_number: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
    status: String,
}

impl SummaryRow {
    fn into_summary(self) -> Result<EstimateSummary> {
        let status = EstimateStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;

        Ok(EstimateSummary {
            id: self.id,
            estimate_number: self.estimate_number,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            status,
        })
    }
}
