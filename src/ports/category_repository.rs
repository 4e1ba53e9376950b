//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::catalog::Category;
use crate::domain::foundation::{CategoryId, DomainError};

/// What a cascading category delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeSummary {
    pub sub_categories_deleted: u64,
    pub products_deleted: u64,
}

impl CascadeSummary {
    /// Total entities removed, including the category itself.
    pub fn total_deleted(&self) -> u64 {
        self.sub_categories_deleted + self.products_deleted + 1
    }
}

/// Persistence port for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persists a new category.
    ///
    /// # Errors
    ///
    /// Fails if a category with the same name already exists (unique
    /// constraint) or on infrastructure failure.
    async fn save(&self, category: &Category) -> Result<(), DomainError>;

    /// Updates an existing category.
    async fn update(&self, category: &Category) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError>;

    /// Case-insensitive lookup by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError>;

    /// All categories, ordered by name.
    async fn list(&self) -> Result<Vec<Category>, DomainError>;

    /// Deletes the category and everything it transitively owns.
    ///
    /// Collects all descendant sub-categories and products first, then
    /// removes them in a single transaction; no partially-cascaded state is
    /// observable.
    ///
    /// # Errors
    ///
    /// Fails with `CategoryNotFound` if the category does not exist.
    async fn delete_cascade(&self, id: CategoryId) -> Result<CascadeSummary, DomainError>;
}
