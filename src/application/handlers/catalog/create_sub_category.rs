//! CreateSubCategoryHandler - creates a sub-category under a category.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, SubCategory};
use crate::domain::foundation::{CategoryId, SubCategoryId};
use crate::ports::{CategoryRepository, SubCategoryRepository};

/// Command to create a sub-category.
#[derive(Debug, Clone)]
pub struct CreateSubCategoryCommand {
    pub name: String,
    pub category_id: CategoryId,
}

/// Handler for sub-category creation.
pub struct CreateSubCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
    sub_categories: Arc<dyn SubCategoryRepository>,
}

impl CreateSubCategoryHandler {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        sub_categories: Arc<dyn SubCategoryRepository>,
    ) -> Self {
        Self {
            categories,
            sub_categories,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubCategoryCommand,
    ) -> Result<MutationResult<SubCategory>, CatalogError> {
        if self.categories.find_by_id(cmd.category_id).await?.is_none() {
            return Err(CatalogError::category_not_found(cmd.category_id));
        }

        let sub_category = SubCategory::new(SubCategoryId::new(), cmd.name, cmd.category_id)?;
        self.sub_categories.save(&sub_category).await?;

        Ok(MutationResult::ok(sub_category))
    }
}
