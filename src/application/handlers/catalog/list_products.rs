//! ListProductsHandler - filtered product listing.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Product, ProductFilter};
use crate::domain::foundation::{CategoryId, SubCategoryId};
use crate::ports::ProductRepository;

/// Query parameters for the product listing.
#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    pub name_contains: Option<String>,
    pub category_id: Option<CategoryId>,
    pub sub_category_id: Option<SubCategoryId>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub low_stock: bool,
}

/// Handler for the product listing query.
pub struct ListProductsHandler {
    products: Arc<dyn ProductRepository>,
}

impl ListProductsHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(&self, query: ListProductsQuery) -> Result<Vec<Product>, CatalogError> {
        let filter = ProductFilter {
            name_contains: query.name_contains,
            category_id: query.category_id,
            sub_category_id: query.sub_category_id,
            min_price_cents: query.min_price_cents,
            max_price_cents: query.max_price_cents,
            low_stock: query.low_stock,
        };

        Ok(self.products.list(&filter).await?)
    }
}
