use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::profiles::models::UserProfile;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: &UserProfile) -> Result<()>;
    async fn find_by_user(&self, user_id: &str) -> Result<Option<UserProfile>>;
    async fn update(&self, profile: &UserProfile) -> Result<()>;
}

pub struct MySqlProfileRepository {
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<()> {
        retry::write("create profile", async {
            sqlx::query(
                r#"
                INSERT INTO user_profiles (
                    id, user_id, company_name, address, phone, tax_number,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&profile.id)
            .bind(&profile.user_id)
            .bind(&profile.company_name)
            .bind(&profile.address)
            .bind(&profile.phone)
            .bind(&profile.tax_number)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        retry::read("fetch profile", || {
            sqlx::query_as::<_, UserProfile>(
                r#"
                SELECT id, user_id, company_name, address, phone, tax_number,
                       created_at, updated_at
                FROM user_profiles
                WHERE user_id = ?
                LIMIT 1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
        })
        .await
    }

    async fn update(&self, profile: &UserProfile) -> Result<()> {
        retry::write("update profile", async {
            sqlx::query(
                r#"
                UPDATE user_profiles
                SET company_name = ?, address = ?, phone = ?, tax_number = ?, updated_at = ?
                WHERE user_id = ?
                "#,
            )
            .bind(&profile.company_name)
            .bind(&profile.address)
            .bind(&profile.phone)
            .bind(&profile.tax_number)
            .bind(profile.updated_at)
            .bind(&profile.user_id)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }
}
