//! CreateProductHandler - adds a product to the catalog.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Product};
use crate::domain::foundation::{CategoryId, Currency, Money, ProductId, SubCategoryId};
use crate::ports::{CategoryRepository, ProductRepository, SubCategoryRepository};

/// Command to create a product.
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: Currency,
    pub amount_in_stock: u32,
    pub category_id: CategoryId,
    pub sub_category_id: Option<SubCategoryId>,
}

/// Handler for product creation.
pub struct CreateProductHandler {
    categories: Arc<dyn CategoryRepository>,
    sub_categories: Arc<dyn SubCategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CreateProductHandler {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        sub_categories: Arc<dyn SubCategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            sub_categories,
            products,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProductCommand,
    ) -> Result<MutationResult<Product>, CatalogError> {
        if self.categories.find_by_id(cmd.category_id).await?.is_none() {
            return Err(CatalogError::category_not_found(cmd.category_id));
        }

        // A sub-category must sit under the same category as the product.
        if let Some(sub_category_id) = cmd.sub_category_id {
            let sub_category = self
                .sub_categories
                .find_by_id(sub_category_id)
                .await?
                .ok_or_else(|| CatalogError::sub_category_not_found(sub_category_id))?;
            if sub_category.category_id != cmd.category_id {
                return Err(CatalogError::sub_category_outside_category(
                    sub_category_id,
                    cmd.category_id,
                ));
            }
        }

        let product = Product::new(
            ProductId::new(),
            cmd.name,
            cmd.description,
            Money::from_cents(cmd.price_cents, cmd.currency),
            cmd.amount_in_stock,
            cmd.category_id,
            cmd.sub_category_id,
        )?;

        self.products.save(&product).await?;

        Ok(MutationResult::ok(product))
    }
}
