use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{retry, AppError, Result};
use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::ItemRow;
use crate::modules::invoices::models::{Invoice, InvoiceStatus, InvoiceSummary};

/// Invoice joined with the client it bills, items populated
pub struct InvoiceWithClient {
    pub invoice: Invoice,
    pub client: ClientSummary,
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert the invoice and its line items in one transaction.
    async fn create(&self, invoice: &Invoice) -> Result<()>;
    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<InvoiceWithClient>>;
    async fn list(&self, user_id: &str) -> Result<Vec<InvoiceWithClient>>;
    async fn list_by_client(&self, client_id: &str, user_id: &str)
        -> Result<Vec<InvoiceSummary>>;
    async fn update_status(
        &self,
        id: &str,
        user_id: &str,
        status: InvoiceStatus,
    ) -> Result<()>;
}

pub struct MySqlInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, invoice_id: &str) -> Result<Vec<ItemRow>> {
        retry::read("fetch invoice items", || {
            sqlx::query_as::<_, ItemRow>(
                r#"
                SELECT id, product_id, description, quantity, unit_price, tax_rate, position
                FROM invoice_items
                WHERE invoice_id = ?
                ORDER BY position
                "#,
            )
            .bind(invoice_id)
            .fetch_all(&self.pool)
        })
        .await
    }
}

#[async_trait]
impl InvoiceRepository for MySqlInvoiceRepository {
    async fn create(&self, invoice: &Invoice) -> Result<()> {
        let result = retry::write("create invoice", async {
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO invoices (
                    id, user_id, client_id, invoice_number, issue_date, due_date,
                    status, notes, terms, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&invoice.id)
            .bind(&invoice.user_id)
            .bind(&invoice.client_id)
            .bind(&invoice.invoice_number)
            .bind(invoice.issue_date)
            .bind(invoice.due_date)
            .bind(invoice.status.to_string())
            .bind(&invoice.notes)
            .bind(&invoice.terms)
            .bind(invoice.created_at)
            .bind(invoice.updated_at)
            .execute(&mut *tx)
            .await?;

            for item in &invoice.items {
                sqlx::query(
                    r#"
                    INSERT INTO invoice_items (
                        id, invoice_id, product_id, description, quantity,
                        unit_price, tax_rate, position
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&invoice.id)
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
                    "Invoice number '{}' already exists.",
                    invoice.invoice_number
                )))
            }
            other => other,
        }
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<InvoiceWithClient>> {
        let row = retry::read("fetch invoice", || {
            sqlx::query_as::<_, InvoiceRow>(
                r#"
                SELECT
                    i.id, i.user_id, i.client_id, i.invoice_number, i.issue_date,
                    i.due_date, i.status, i.notes, i.terms, i.created_at, i.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM invoices i
                JOIN clients c ON c.id = i.client_id
                WHERE i.id = ? AND i.user_id = ?
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
        Ok(Some(row.into_invoice_with_client(items)?))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<InvoiceWithClient>> {
        let rows = retry::read("list invoices", || {
            sqlx::query_as::<_, InvoiceRow>(
                r#"
                SELECT
                    i.id, i.user_id, i.client_id, i.invoice_number, i.issue_date,
                    i.due_date, i.status, i.notes, i.terms, i.created_at, i.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM invoices i
                JOIN clients c ON c.id = i.client_id
                WHERE i.user_id = ?
                ORDER BY i.created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.fetch_items(&row.id).await?;
            invoices.push(row.into_invoice_with_client(items)?);
        }

        Ok(invoices)
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        user_id: &str,
    ) -> Result<Vec<InvoiceSummary>> {
        let rows = retry::read("list client invoices", || {
            sqlx::query_as::<_, SummaryRow>(
                r#"
                SELECT id, invoice_number, issue_date, due_date, status
                FROM invoices
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
        status: InvoiceStatus,
    ) -> Result<()> {
        let result = retry::write("update invoice status", async {
            sqlx::query(
                r#"
                UPDATE invoices
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
            return Err(AppError::not_found("Invoice"));
        }

        Ok(())
    }
}

// Database mapping

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    user_id: String,
    client_id: String,
    invoice_number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
    notes: Option<String>,
    terms: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    client_name: String,
    client_email: String,
}

impl InvoiceRow {
    fn into_invoice_with_client(self, item_rows: Vec<ItemRow>) -> Result<InvoiceWithClient> {
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;

        let client = ClientSummary {
            id: self.client_id.clone(),
            name: self.client_name,
            email: self.client_email,
        };

        Ok(InvoiceWithClient {
            invoice: Invoice {
                id: self.id,
                user_id: self.user_id,
                client_id: self.client_id,
                invoice_number: self.invoice_number,
                issue_date: self.issue_date,
                due_date: self.due_date,
                status,
                notes: self.notes,
                terms: self.terms,
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
    invoice_number: String,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
}

impl SummaryRow {
    fn into_summary(self) -> Result<InvoiceSummary> {
        let status = InvoiceStatus::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;

        Ok(InvoiceSummary {
            id: self.id,
            invoice_number: self.invoice_number,
            issue_date: self.issue_date,
            due_date: self.due_date,
            status,
        })
    }
}
