//! Port for product persistence.

use async_trait::async_trait;

use crate::domain::catalog::{Product, ProductFilter};
use crate::domain::foundation::{DomainError, ProductId};

/// Persistence port for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, product: &Product) -> Result<(), DomainError>;

    async fn update(&self, product: &Product) -> Result<(), DomainError>;

    /// Fetches a product with its images.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError>;

    /// Fetches the products among `ids` that still exist.
    ///
    /// Missing ids are silently skipped; cart reconciliation depends on
    /// observing the gap.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// Products matching the filter, ordered by name.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError>;

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Fails with `ProductNotFound` if the product does not exist.
    async fn delete(&self, id: ProductId) -> Result<(), DomainError>;
}
