//! UpdateProductHandler - full replacement of a product's mutable fields.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Product};
use crate::domain::foundation::{CategoryId, Currency, Money, ProductId, SubCategoryId};
use crate::ports::{CategoryRepository, ProductRepository, SubCategoryRepository};

/// Command to update a product. All fields are replaced.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: Currency,
    pub amount_in_stock: u32,
    pub category_id: CategoryId,
    pub sub_category_id: Option<SubCategoryId>,
}

/// Handler for product updates.
pub struct UpdateProductHandler {
    categories: Arc<dyn CategoryRepository>,
    sub_categories: Arc<dyn SubCategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl UpdateProductHandler {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        sub_categories: Arc<dyn SubCategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            sub_categories,
            products,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProductCommand,
    ) -> Result<MutationResult<Product>, CatalogError> {
        let mut product = self
            .products
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(cmd.id))?;

        if self.categories.find_by_id(cmd.category_id).await?.is_none() {
            return Err(CatalogError::category_not_found(cmd.category_id));
        }
        if let Some(sub_category_id) = cmd.sub_category_id {
            let sub_category = self
                .sub_categories
                .find_by_id(sub_category_id)
                .await?
                .ok_or_else(|| CatalogError::sub_category_not_found(sub_category_id))?;
            if sub_category.category_id != cmd.category_id {
                return Err(CatalogError::sub_category_outside_category(
                    sub_category_id,
                    cmd.category_id,
                ));
            }
        }

        product.rename(cmd.name)?;
        product.set_description(cmd.description);
        product.set_price(Money::from_cents(cmd.price_cents, cmd.currency))?;
        product.set_stock(cmd.amount_in_stock);
        product.reassign(cmd.category_id, cmd.sub_category_id);

        self.products.update(&product).await?;

        Ok(MutationResult::ok(product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::catalog::Category;

    async fn seeded() -> (UpdateProductHandler, Product, CategoryId) {
        let store = Arc::new(MemoryStore::new());
        let category = Category::new(CategoryId::new(), "Electronics").unwrap();
        CategoryRepository::save(store.as_ref(), &category)
            .await
            .unwrap();

        let product = Product::new(
            ProductId::new(),
            "Ultrabook",
            None,
            Money::from_cents(99900, Currency::Usd),
            10,
            category.id,
            None,
        )
        .unwrap();
        ProductRepository::save(store.as_ref(), &product)
            .await
            .unwrap();

        (
            UpdateProductHandler::new(store.clone(), store.clone(), store),
            product,
            category.id,
        )
    }

    #[tokio::test]
    async fn replaces_fields() {
        let (handler, product, category_id) = seeded().await;

        let result = handler
            .handle(UpdateProductCommand {
                id: product.id,
                name: "Ultrabook Pro".to_string(),
                description: Some("Faster".to_string()),
                price_cents: 129900,
                currency: Currency::Usd,
                amount_in_stock: 7,
                category_id,
                sub_category_id: None,
            })
            .await
            .unwrap();

        let updated = result.entity.unwrap();
        assert_eq!(updated.name, "Ultrabook Pro");
        assert_eq!(updated.price.cents, 129900);
        assert_eq!(updated.amount_in_stock, 7);
        assert_eq!(updated.description.as_deref(), Some("Faster"));
    }

    #[tokio::test]
    async fn fails_for_unknown_product() {
        let (handler, _product, category_id) = seeded().await;

        let result = handler
            .handle(UpdateProductCommand {
                id: ProductId::new(),
                name: "Ghost".to_string(),
                description: None,
                price_cents: 100,
                currency: Currency::Usd,
                amount_in_stock: 1,
                category_id,
                sub_category_id: None,
            })
            .await;

        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn fails_for_unknown_target_category() {
        let (handler, product, _category_id) = seeded().await;

        let result = handler
            .handle(UpdateProductCommand {
                id: product.id,
                name: "Ultrabook".to_string(),
                description: None,
                price_cents: 99900,
                currency: Currency::Usd,
                amount_in_stock: 10,
                category_id: CategoryId::new(),
                sub_category_id: None,
            })
            .await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }
}
