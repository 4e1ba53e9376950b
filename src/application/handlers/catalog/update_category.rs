//! UpdateCategoryHandler - renames a category.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryRepository;

/// Command to rename a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: CategoryId,
    pub name: String,
}

/// Handler for category updates.
pub struct UpdateCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCategoryCommand,
    ) -> Result<MutationResult<Category>, CatalogError> {
        let mut category = self
            .categories
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::category_not_found(cmd.id))?;

        category.rename(cmd.name)?;

        if let Some(existing) = self.categories.find_by_name(&category.name).await? {
            if existing.id != category.id {
                return Err(CatalogError::name_taken(category.name));
            }
        }

        self.categories.update(&category).await?;

        Ok(MutationResult::ok(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    async fn seeded(name: &str) -> (UpdateCategoryHandler, Category) {
        let store = Arc::new(MemoryStore::new());
        let category = Category::new(CategoryId::new(), name).unwrap();
        CategoryRepository::save(store.as_ref(), &category)
            .await
            .unwrap();
        (UpdateCategoryHandler::new(store), category)
    }

    #[tokio::test]
    async fn renames_existing_category() {
        let (handler, category) = seeded("Books").await;

        let result = handler
            .handle(UpdateCategoryCommand {
                id: category.id,
                name: "Used Books".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.entity.unwrap().name, "Used Books");
    }

    #[tokio::test]
    async fn fails_for_unknown_category() {
        let (handler, _category) = seeded("Books").await;

        let result = handler
            .handle(UpdateCategoryCommand {
                id: CategoryId::new(),
                name: "Anything".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let (handler, category) = seeded("Books").await;

        let result = handler
            .handle(UpdateCategoryCommand {
                id: category.id,
                name: "Books".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }
}
