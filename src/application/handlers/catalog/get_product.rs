//! GetProductHandler - product detail with nested reviews.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Comment, Product, Rating};
use crate::domain::foundation::ProductId;
use crate::ports::{ProductRepository, ReviewRepository};

/// A product with its attached ratings and comments.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product: Product,
    pub ratings: Vec<Rating>,
    pub comments: Vec<Comment>,
}

/// Handler for the product detail query.
pub struct GetProductHandler {
    products: Arc<dyn ProductRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl GetProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { products, reviews }
    }

    pub async fn handle(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))?;

        let ratings = self.reviews.list_ratings(id).await?;
        let comments = self.reviews.list_comments(id).await?;

        Ok(ProductDetail {
            product,
            ratings,
            comments,
        })
    }
}
