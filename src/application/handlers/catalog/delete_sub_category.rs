//! DeleteSubCategoryHandler - removes a sub-category, detaching products.
//!
//! Asymmetric with category deletion on purpose: a product's primary
//! anchor is its category, so losing a sub-category only clears the
//! product's sub-category reference.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, SubCategory};
use crate::domain::foundation::SubCategoryId;
use crate::ports::SubCategoryRepository;

/// Command to delete a sub-category.
#[derive(Debug, Clone)]
pub struct DeleteSubCategoryCommand {
    pub id: SubCategoryId,
}

/// The deleted sub-category and how many products were detached.
#[derive(Debug, Clone)]
pub struct DeletedSubCategory {
    pub sub_category: SubCategory,
    pub products_detached: u64,
}

/// Handler for sub-category deletion.
pub struct DeleteSubCategoryHandler {
    sub_categories: Arc<dyn SubCategoryRepository>,
}

impl DeleteSubCategoryHandler {
    pub fn new(sub_categories: Arc<dyn SubCategoryRepository>) -> Self {
        Self { sub_categories }
    }

    pub async fn handle(
        &self,
        cmd: DeleteSubCategoryCommand,
    ) -> Result<MutationResult<DeletedSubCategory>, CatalogError> {
        let sub_category = self
            .sub_categories
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::sub_category_not_found(cmd.id))?;

        let products_detached = self.sub_categories.delete_detaching_products(cmd.id).await?;

        Ok(MutationResult::ok(DeletedSubCategory {
            sub_category,
            products_detached,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::catalog::Product;
    use crate::domain::foundation::{CategoryId, Currency, Money, ProductId};
    use crate::ports::ProductRepository;

    #[tokio::test]
    async fn detaches_products_instead_of_deleting() {
        let store = Arc::new(MemoryStore::new());
        let category_id = CategoryId::new();
        let sub = SubCategory::new(SubCategoryId::new(), "Laptops", category_id).unwrap();
        SubCategoryRepository::save(store.as_ref(), &sub)
            .await
            .unwrap();

        let product = Product::new(
            ProductId::new(),
            "Ultrabook",
            None,
            Money::from_cents(99900, Currency::Usd),
            4,
            category_id,
            Some(sub.id),
        )
        .unwrap();
        ProductRepository::save(store.as_ref(), &product)
            .await
            .unwrap();

        let handler = DeleteSubCategoryHandler::new(store.clone());
        let result = handler
            .handle(DeleteSubCategoryCommand { id: sub.id })
            .await
            .unwrap();

        assert_eq!(result.entity.unwrap().products_detached, 1);
        let stored = ProductRepository::find_by_id(store.as_ref(), product.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.sub_category_id.is_none());
        assert_eq!(stored.name, "Ultrabook");
    }

    #[tokio::test]
    async fn fails_for_unknown_sub_category() {
        let store = Arc::new(MemoryStore::new());
        let handler = DeleteSubCategoryHandler::new(store);

        let result = handler
            .handle(DeleteSubCategoryCommand {
                id: SubCategoryId::new(),
            })
            .await;

        assert!(matches!(result, Err(CatalogError::SubCategoryNotFound(_))));
    }
}
