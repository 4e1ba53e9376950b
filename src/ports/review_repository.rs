//! Port for rating and comment persistence.

use async_trait::async_trait;

use crate::domain::catalog::{Comment, Rating};
use crate::domain::foundation::{DomainError, ProductId};

/// Persistence port for product reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn save_rating(&self, rating: &Rating) -> Result<(), DomainError>;

    async fn save_comment(&self, comment: &Comment) -> Result<(), DomainError>;

    /// Ratings on a product, newest first.
    async fn list_ratings(&self, product_id: ProductId) -> Result<Vec<Rating>, DomainError>;

    /// Comments on a product, newest first.
    async fn list_comments(&self, product_id: ProductId) -> Result<Vec<Comment>, DomainError>;
}
