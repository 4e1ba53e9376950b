//! DeleteProductHandler - removes a product from the catalog.
//!
//! Order snapshots keep their frozen copy of the product; carts drop the
//! dangling item lazily on next read.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Product};
use crate::domain::foundation::ProductId;
use crate::ports::ProductRepository;

/// Command to delete a product.
#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}

/// Handler for product deletion.
pub struct DeleteProductHandler {
    products: Arc<dyn ProductRepository>,
}

impl DeleteProductHandler {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn handle(
        &self,
        cmd: DeleteProductCommand,
    ) -> Result<MutationResult<Product>, CatalogError> {
        let product = self
            .products
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(cmd.id))?;

        self.products.delete(cmd.id).await?;

        Ok(MutationResult::ok(product))
    }
}
