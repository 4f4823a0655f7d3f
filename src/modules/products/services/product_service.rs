use std::sync::Arc;

use crate::core::{Result, Valid};
use crate::middleware::SessionContext;
use crate::modules::products::models::{CreateProductRequest, Product, ProductResponse};
use crate::modules::products::repositories::ProductRepository;

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn create_product(
        &self,
        ctx: &SessionContext,
        request: Valid<CreateProductRequest>,
    ) -> Result<ProductResponse> {
        let request = request.into_inner();

        let product = Product::new(
            ctx.user_id.clone(),
            request.name,
            request.description,
            request.unit_price,
            request.tax_rate,
        )?;

        self.products.create(&product).await?;

        Ok(ProductResponse::from(&product))
    }

    pub async fn list_products(&self, ctx: &SessionContext) -> Result<Vec<ProductResponse>> {
        let products = self.products.list(&ctx.user_id).await?;

        Ok(products.iter().map(ProductResponse::from).collect())
    }
}
