use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{retry, AppError, Result};
use crate::modules::clients::models::ClientSummary;
use crate::modules::documents::models::ItemRow;
use crate::modules::recurring::models::{
    Frequency, RecurringInvoice, RecurringInvoiceSummary,
};

/// Template joined with the client it bills, items populated
pub struct RecurringWithClient {
    pub template: RecurringInvoice,
    pub client: ClientSummary,
}

#[async_trait]
pub trait RecurringInvoiceRepository: Send + Sync {
    /// Insert the template and its line items in one transaction.
    async fn create(&self, template: &RecurringInvoice) -> Result<()>;
    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<RecurringWithClient>>;
    async fn list(&self, user_id: &str) -> Result<Vec<RecurringWithClient>>;
    async fn list_by_client(
        &self,
        client_id: &str,
        user_id: &str,
    ) -> Result<Vec<RecurringInvoiceSummary>>;
}

pub struct MySqlRecurringInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlRecurringInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, recurring_id: &str) -> Result<Vec<ItemRow>> {
        retry::read("fetch recurring invoice items", || {
            sqlx::query_as::<_, ItemRow>(
                r#"
                SELECT id, product_id, description, quantity, unit_price, tax_rate, position
                FROM recurring_items
                WHERE recurring_id = ?
                ORDER BY position
                "#,
            )
            .bind(recurring_id)
            .fetch_all(&self.pool)
        })
        .await
    }
}

#[async_trait]
impl RecurringInvoiceRepository for MySqlRecurringInvoiceRepository {
    async fn create(&self, template: &RecurringInvoice) -> Result<()> {
        retry::write("create recurring invoice", async {
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                INSERT INTO recurring_invoices (
                    id, user_id, client_id, name, frequency, day_of_month,
                    start_date, end_date, generation_limit, payment_terms,
                    auto_send, notes, terms, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&template.id)
            .bind(&template.user_id)
            .bind(&template.client_id)
            .bind(&template.name)
            .bind(template.frequency.to_string())
            .bind(template.day_of_month)
            .bind(template.start_date)
            .bind(template.end_date)
            .bind(template.generation_limit)
            .bind(&template.payment_terms)
            .bind(template.auto_send)
            .bind(&template.notes)
            .bind(&template.terms)
            .bind(template.created_at)
            .bind(template.updated_at)
            .execute(&mut *tx)
            .await?;

            for item in &template.items {
                sqlx::query(
                    r#"
                    INSERT INTO recurring_items (
                        id, recurring_id, product_id, description, quantity,
                        unit_price, tax_rate, position
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&template.id)
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
        .await
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<RecurringWithClient>> {
        let row = retry::read("fetch recurring invoice", || {
            sqlx::query_as::<_, RecurringRow>(
                r#"
                SELECT
                    r.id, r.user_id, r.client_id, r.name, r.frequency, r.day_of_month,
                    r.start_date, r.end_date, r.generation_limit, r.payment_terms,
                    r.auto_send, r.notes, r.terms, r.created_at, r.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM recurring_invoices r
                JOIN clients c ON c.id = r.client_id
                WHERE r.id = ? AND r.user_id = ?
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
        Ok(Some(row.into_recurring_with_client(items)?))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<RecurringWithClient>> {
        let rows = retry::read("list recurring invoices", || {
            sqlx::query_as::<_, RecurringRow>(
                r#"
                SELECT
                    r.id, r.user_id, r.client_id, r.name, r.frequency, r.day_of_month,
                    r.start_date, r.end_date, r.generation_limit, r.payment_terms,
                    r.auto_send, r.notes, r.terms, r.created_at, r.updated_at,
                    c.name AS client_name, c.email AS client_email
                FROM recurring_invoices r
                JOIN clients c ON c.id = r.client_id
                WHERE r.user_id = ?
                ORDER BY r.created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await?;

        let mut templates = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.fetch_items(&row.id).await?;
            templates.push(row.into_recurring_with_client(items)?);
        }

        Ok(templates)
    }

    async fn list_by_client(
        &self,
        client_id: &str,
        user_id: &str,
    ) -> Result<Vec<RecurringInvoiceSummary>> {
        let rows = retry::read("list client recurring invoices", || {
            sqlx::query_as::<_, SummaryRow>(
                r#"
                SELECT id, name, frequency, start_date, end_date
                FROM recurring_invoices
                WHERE client_id = ? AND user_id = ?
                ORDER BY start_date DESC
                "#,
            )
            .bind(client_id)
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }
}

// Database mapping

#[derive(Debug, sqlx::FromRow)]
struct RecurringRow {
    id: String,
    user_id: String,
    client_id: String,
    name: Option<String>,
    frequency: String,
    day_of_month: Option<u32>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    generation_limit: Option<u32>,
    payment_terms: String,
    auto_send: bool,
    notes: Option<String>,
    terms: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    client_name: String,
    client_email: String,
}

impl RecurringRow {
    fn into_recurring_with_client(self, item_rows: Vec<ItemRow>) -> Result<RecurringWithClient> {
        let frequency = Frequency::from_str(&self.frequency)
            .map_err(|e| AppError::internal(format!("Invalid frequency in database: {}", e)))?;

        let client = ClientSummary {
            id: self.client_id.clone(),
            name: self.client_name,
            email: self.client_email,
        };

        Ok(RecurringWithClient {
            template: RecurringInvoice {
                id: self.id,
                user_id: self.user_id,
                client_id: self.client_id,
                name: self.name,
                frequency,
                day_of_month: self.day_of_month,
                start_date: self.start_date,
                end_date: self.end_date,
                generation_limit: self.generation_limit,
                payment_terms: self.payment_terms,
                auto_send: self.auto_send,
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
    name: Option<String>,
    frequency: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl SummaryRow {
    fn into_summary(self) -> Result<RecurringInvoiceSummary> {
        let frequency = Frequency::from_str(&self.frequency)
            .map_err(|e| AppError::internal(format!("Invalid frequency in database: {}", e)))?;

        Ok(RecurringInvoiceSummary {
            id: self.id,
            name: self.name,
            frequency,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}
