use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{retry, Result};
use crate::modules::products::models::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<()>;
    async fn list(&self, user_id: &str) -> Result<Vec<Product>>;
}

pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn create(&self, product: &Product) -> Result<()> {
        retry::write("create product", async {
            sqlx::query(
                r#"
                INSERT INTO products (
                    id, user_id, name, description, unit_price, tax_rate,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&product.id)
            .bind(&product.user_id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.unit_price)
            .bind(product.tax_rate)
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map(|_| ())
        })
        .await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Product>> {
        retry::read("list products", || {
            sqlx::query_as::<_, Product>(
                r#"
                SELECT id, user_id, name, description, unit_price, tax_rate,
                       created_at, updated_at
                FROM products
                WHERE user_id = ?
                ORDER BY name
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
        })
        .await
    }
}
