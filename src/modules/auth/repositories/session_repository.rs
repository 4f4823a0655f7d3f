use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::auth::models::Session;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    /// Housekeeping; called opportunistically on login.
    async fn delete_expired(&self, user_id: &str) -> Result<()>;
}

pub struct MySqlSessionRepository {
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, session: &Session) -> Result<()> {
        retry::write("create session", async {
            sqlx::query(
                r#"
                INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&session.id)
            .bind(&session.user_id)
            .bind(&session.token_hash)
            .bind(session.expires_at)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        retry::write("delete session", async {
            sqlx::query("DELETE FROM sessions WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await
                .map(|_| ())
        })
        .await
    }

    async fn delete_expired(&self, user_id: &str) -> Result<()> {
        retry::write("delete expired sessions", async {
            sqlx::query("DELETE FROM sessions WHERE user_id = ? AND expires_at <= ?")
                .bind(user_id)
                .bind(chrono::Utc::now())
                .execute(&self.pool)
                .await
                .map(|_| ())
        })
        .await
    }
}
