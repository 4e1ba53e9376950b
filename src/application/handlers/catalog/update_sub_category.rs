//! UpdateSubCategoryHandler - renames a sub-category.
//!
//! Renames only: moving a sub-category to another category would silently
//! break the category consistency of every product under it.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, SubCategory};
use crate::domain::foundation::SubCategoryId;
use crate::ports::SubCategoryRepository;

/// Command to rename a sub-category.
#[derive(Debug, Clone)]
pub struct UpdateSubCategoryCommand {
    pub id: SubCategoryId,
    pub name: String,
}

/// Handler for sub-category updates.
pub struct UpdateSubCategoryHandler {
    sub_categories: Arc<dyn SubCategoryRepository>,
}

impl UpdateSubCategoryHandler {
    pub fn new(sub_categories: Arc<dyn SubCategoryRepository>) -> Self {
        Self { sub_categories }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSubCategoryCommand,
    ) -> Result<MutationResult<SubCategory>, CatalogError> {
        let mut sub_category = self
            .sub_categories
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::sub_category_not_found(cmd.id))?;

        sub_category.rename(cmd.name)?;
        self.sub_categories.update(&sub_category).await?;

        Ok(MutationResult::ok(sub_category))
    }
}
