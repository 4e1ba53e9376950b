//! Port for sub-category persistence.

use async_trait::async_trait;

use crate::domain::catalog::SubCategory;
use crate::domain::foundation::{CategoryId, DomainError, SubCategoryId};

/// Persistence port for sub-categories.
#[async_trait]
pub trait SubCategoryRepository: Send + Sync {
    async fn save(&self, sub_category: &SubCategory) -> Result<(), DomainError>;

    async fn update(&self, sub_category: &SubCategory) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: SubCategoryId) -> Result<Option<SubCategory>, DomainError>;

    /// Sub-categories under a category, ordered by name.
    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, DomainError>;

    /// Deletes the sub-category and clears the reference on its products.
    ///
    /// Products are detached, never deleted: their primary anchor is the
    /// category. Returns the number of products detached.
    ///
    /// # Errors
    ///
    /// Fails with `SubCategoryNotFound` if the sub-category does not exist.
    async fn delete_detaching_products(&self, id: SubCategoryId) -> Result<u64, DomainError>;
}
