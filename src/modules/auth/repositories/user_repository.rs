use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::auth::models::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
}

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: &User) -> Result<()> {
        retry::write("create user", async {
            sqlx::query(
                r#"
                INSERT INTO users (id, email, password_hash, created_at)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        retry::read("find user", || {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password_hash, created_at
                FROM users
                WHERE email = ?
                LIMIT 1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        retry::read("find user", || {
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password_hash, created_at
                FROM users
                WHERE id = ?
                LIMIT 1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
        })
        .await
    }
}
