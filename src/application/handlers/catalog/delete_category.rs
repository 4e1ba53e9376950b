//! DeleteCategoryHandler - cascading category deletion.
//!
//! Deleting a category removes every sub-category and product anchored to
//! it. The operation is destructive and non-reversible, so the boundary
//! must pass an explicit confirmation; without it nothing is touched.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryRepository;

/// Command to delete a category and its descendants.
#[derive(Debug, Clone)]
pub struct DeleteCategoryCommand {
    pub id: CategoryId,
    /// Explicit acknowledgement of the cascade.
    pub confirmed: bool,
}

/// The deleted category and the extent of the cascade.
#[derive(Debug, Clone)]
pub struct DeletedCategory {
    pub category: Category,
    pub sub_categories_deleted: u64,
    pub products_deleted: u64,
}

/// Handler for cascading category deletion.
pub struct DeleteCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCategoryCommand,
    ) -> Result<MutationResult<DeletedCategory>, CatalogError> {
        if !cmd.confirmed {
            return Err(CatalogError::cascade_not_confirmed(cmd.id));
        }

        let category = self
            .categories
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::category_not_found(cmd.id))?;

        let summary = self.categories.delete_cascade(cmd.id).await?;

        tracing::info!(
            category_id = %cmd.id,
            sub_categories = summary.sub_categories_deleted,
            products = summary.products_deleted,
            "category cascade delete"
        );

        Ok(MutationResult::ok(DeletedCategory {
            category,
            sub_categories_deleted: summary.sub_categories_deleted,
            products_deleted: summary.products_deleted,
        }))
    }
}
