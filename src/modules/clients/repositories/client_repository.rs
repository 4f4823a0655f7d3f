use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::clients::models::Client;

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<()>;
    async fn list(&self, user_id: &str) -> Result<Vec<Client>>;
    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Client>>;
}

pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn create(&self, client: &Client) -> Result<()> {
        retry::write("create client", async {
            sqlx::query(
                r#"
                INSERT INTO clients (id, user_id, name, email, address, phone, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&client.id)
            .bind(&client.user_id)
            .bind(&client.name)
            .bind(&client.email)
            .bind(&client.address)
            .bind(&client.phone)
            .bind(client.created_at)
            .bind(client.updated_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Client>> {
        retry::read("list clients", || {
            sqlx::query_as::<_, Client>(
                r#"
                SELECT id, user_id, name, email, address, phone, created_at, updated_at
                FROM clients
                WHERE user_id = ?
                ORDER BY name
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<Client>> {
        retry::read("find client", || {
            sqlx::query_as::<_, Client>(
                r#"
                SELECT id, user_id, name, email, address, phone, created_at, updated_at
                FROM clients
                WHERE id = ? AND user_id = ?
                LIMIT 1
                "#,
            )
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
        })
        .await
    }
}
