//! GetCategoryTreeHandler - the nested category listing query.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, CategoryNode};
use crate::ports::{CategoryRepository, SubCategoryRepository};

/// Handler for the category tree query.
pub struct GetCategoryTreeHandler {
    categories: Arc<dyn CategoryRepository>,
    sub_categories: Arc<dyn SubCategoryRepository>,
}

impl GetCategoryTreeHandler {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        sub_categories: Arc<dyn SubCategoryRepository>,
    ) -> Self {
        Self {
            categories,
            sub_categories,
        }
    }

    pub async fn handle(&self) -> Result<Vec<CategoryNode>, CatalogError> {
        let categories = self.categories.list().await?;

        let mut tree = Vec::with_capacity(categories.len());
        for category in categories {
            let sub_categories = self.sub_categories.list_by_category(category.id).await?;
            tree.push(CategoryNode {
                category,
                sub_categories,
            });
        }

        Ok(tree)
    }
}
