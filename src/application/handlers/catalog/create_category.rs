//! CreateCategoryHandler - creates a top-level catalog category.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::CategoryId;
use crate::ports::CategoryRepository;

/// Command to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
}

/// Handler for category creation.
pub struct CreateCategoryHandler {
    categories: Arc<dyn CategoryRepository>,
}

impl CreateCategoryHandler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn handle(
        &self,
        cmd: CreateCategoryCommand,
    ) -> Result<MutationResult<Category>, CatalogError> {
        let category = Category::new(CategoryId::new(), cmd.name)?;

        if self.categories.find_by_name(&category.name).await?.is_some() {
            return Err(CatalogError::name_taken(category.name));
        }

        self.categories.save(&category).await?;

        Ok(MutationResult::ok(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    fn handler_with_store() -> (CreateCategoryHandler, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CreateCategoryHandler::new(store.clone()), store)
    }

    #[tokio::test]
    async fn creates_category_with_trimmed_name() {
        let (handler, _store) = handler_with_store();

        let result = handler
            .handle(CreateCategoryCommand {
                name: "  Electronics ".to_string(),
            })
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(result.entity.unwrap().name, "Electronics");
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let (handler, _store) = handler_with_store();

        let result = handler
            .handle(CreateCategoryCommand {
                name: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CatalogError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let (handler, _store) = handler_with_store();
        handler
            .handle(CreateCategoryCommand {
                name: "Books".to_string(),
            })
            .await
            .unwrap();

        let result = handler
            .handle(CreateCategoryCommand {
                name: "books".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CatalogError::NameTaken(_))));
    }
}
