//! In-memory implementation of the persistence ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::catalog::{Category, Comment, Product, ProductFilter, Rating, SubCategory};
use crate::domain::foundation::{
    CartId, CartItemId, CategoryId, Cursor, DomainError, ErrorCode, OrderId, PaymentId, ProductId,
    SubCategoryId, Timestamp, UserId,
};
use crate::domain::order::Order;
use crate::domain::payment::Payment;
use crate::ports::{
    CartRepository, CascadeSummary, CategoryRepository, CheckoutCommitError, CheckoutStore,
    OrderRepository, PaymentRepository, ProductRepository, ReviewRepository, SubCategoryRepository,
};

#[derive(Debug, Default)]
struct StoreInner {
    categories: HashMap<CategoryId, Category>,
    sub_categories: HashMap<SubCategoryId, SubCategory>,
    products: HashMap<ProductId, Product>,
    carts: HashMap<CartId, Cart>,
    cart_items: HashMap<CartItemId, CartItem>,
    orders: HashMap<OrderId, Order>,
    payments: HashMap<PaymentId, Payment>,
    ratings: Vec<Rating>,
    comments: Vec<Comment>,
}

/// Process-local store implementing every persistence port.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored data (useful for tests).
    pub async fn clear(&self) {
        *self.inner.write().await = StoreInner::default();
    }

    /// Number of stored products.
    pub async fn product_count(&self) -> usize {
        self.inner.read().await.products.len()
    }

    /// Number of stored cart items across all carts.
    pub async fn cart_item_count(&self) -> usize {
        self.inner.read().await.cart_items.len()
    }
}

/// Sorts newest first with id as tie-break, then applies the cursor window.
fn page_after<T>(
    mut rows: Vec<T>,
    key_of: impl Fn(&T) -> (Timestamp, uuid::Uuid),
    limit: u32,
    cursor: Option<Cursor>,
) -> Vec<T> {
    rows.sort_by(|a, b| key_of(b).cmp(&key_of(a)));
    rows.into_iter()
        .filter(|row| match &cursor {
            None => true,
            Some(cursor) => key_of(row) < (cursor.created_at, cursor.id),
        })
        .take(limit as usize)
        .collect()
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn save(&self, category: &Category) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        let name_taken = inner
            .categories
            .values()
            .any(|c| c.id != category.id && c.name.eq_ignore_ascii_case(&category.name));
        if name_taken {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Category name '{}' already exists", category.name),
            )
            .with_detail("field", "name"));
        }
        inner.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.categories.contains_key(&category.id) {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }
        let name_taken = inner
            .categories
            .values()
            .any(|c| c.id != category.id && c.name.eq_ignore_ascii_case(&category.name));
        if name_taken {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Category name '{}' already exists", category.name),
            )
            .with_detail("field", "name"));
        }
        inner.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories: Vec<Category> =
            self.inner.read().await.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_cascade(&self, id: CategoryId) -> Result<CascadeSummary, DomainError> {
        let mut inner = self.inner.write().await;
        if inner.categories.remove(&id).is_none() {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }

        // Collect every descendant first, then delete in one sweep.
        let sub_ids: Vec<SubCategoryId> = inner
            .sub_categories
            .values()
            .filter(|s| s.category_id == id)
            .map(|s| s.id)
            .collect();
        let product_ids: Vec<ProductId> = inner
            .products
            .values()
            .filter(|p| p.category_id == id)
            .map(|p| p.id)
            .collect();

        for sub_id in &sub_ids {
            inner.sub_categories.remove(sub_id);
        }
        for product_id in &product_ids {
            inner.products.remove(product_id);
            inner.ratings.retain(|r| r.product_id != *product_id);
            inner.comments.retain(|c| c.product_id != *product_id);
        }

        Ok(CascadeSummary {
            sub_categories_deleted: sub_ids.len() as u64,
            products_deleted: product_ids.len() as u64,
        })
    }
}

#[async_trait]
impl SubCategoryRepository for MemoryStore {
    async fn save(&self, sub_category: &SubCategory) -> Result<(), DomainError> {
        self.inner
            .write()
            .await
            .sub_categories
            .insert(sub_category.id, sub_category.clone());
        Ok(())
    }

    async fn update(&self, sub_category: &SubCategory) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.sub_categories.contains_key(&sub_category.id) {
            return Err(DomainError::new(
                ErrorCode::SubCategoryNotFound,
                "Sub-category not found",
            ));
        }
        inner
            .sub_categories
            .insert(sub_category.id, sub_category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SubCategoryId) -> Result<Option<SubCategory>, DomainError> {
        Ok(self.inner.read().await.sub_categories.get(&id).cloned())
    }

    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, DomainError> {
        let mut subs: Vec<SubCategory> = self
            .inner
            .read()
            .await
            .sub_categories
            .values()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect();
        subs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subs)
    }

    async fn delete_detaching_products(&self, id: SubCategoryId) -> Result<u64, DomainError> {
        let mut inner = self.inner.write().await;
        if inner.sub_categories.remove(&id).is_none() {
            return Err(DomainError::new(
                ErrorCode::SubCategoryNotFound,
                "Sub-category not found",
            ));
        }
        let mut detached = 0;
        for product in inner.products.values_mut() {
            if product.sub_category_id == Some(id) {
                product.detach_sub_category();
                detached += 1;
            }
        }
        Ok(detached)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        self.inner
            .write()
            .await
            .products
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.products.contains_key(&product.id) {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }
        inner.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.get(id).cloned())
            .collect())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self
            .inner
            .read()
            .await
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if inner.products.remove(&id).is_none() {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }
        inner.ratings.retain(|r| r.product_id != id);
        inner.comments.retain(|c| c.product_id != id);
        // Cart items referencing the product stay behind on purpose: the
        // read path reconciles them away lazily.
        Ok(())
    }
}

#[async_trait]
impl CartRepository for MemoryStore {
    async fn find_or_create(&self, user_id: &UserId) -> Result<Cart, DomainError> {
        let mut inner = self.inner.write().await;
        if let Some(cart) = inner.carts.values().find(|c| &c.user_id == user_id) {
            return Ok(cart.clone());
        }
        let cart = Cart::new(CartId::new(), user_id.clone());
        inner.carts.insert(cart.id, cart.clone());
        Ok(cart)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .carts
            .values()
            .find(|c| &c.user_id == user_id)
            .cloned())
    }

    async fn list_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, DomainError> {
        let mut items: Vec<CartItem> = self
            .inner
            .read()
            .await
            .cart_items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.created_at, *i.id.as_uuid()));
        Ok(items)
    }

    async fn find_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .cart_items
            .get(&item_id)
            .filter(|i| i.cart_id == cart_id)
            .cloned())
    }

    async fn find_item_for_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .cart_items
            .values()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
            .cloned())
    }

    async fn save_item(&self, item: &CartItem) -> Result<(), DomainError> {
        self.inner
            .write()
            .await
            .cart_items
            .insert(item.id, item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &CartItem) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.cart_items.contains_key(&item.id) {
            return Err(DomainError::new(
                ErrorCode::CartItemNotFound,
                "Cart item not found",
            ));
        }
        inner.cart_items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_item(&self, item_id: CartItemId) -> Result<(), DomainError> {
        self.inner.write().await.cart_items.remove(&item_id);
        Ok(())
    }

    async fn delete_items(&self, item_ids: &[CartItemId]) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        for item_id in item_ids {
            inner.cart_items.remove(item_id);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.inner.read().await.orders.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Order>, DomainError> {
        let orders: Vec<Order> = self
            .inner
            .read()
            .await
            .orders
            .values()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        Ok(page_after(
            orders,
            |o| (o.created_at, *o.id.as_uuid()),
            limit,
            cursor,
        ))
    }

    async fn update_status(&self, order: &Order) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        match inner.orders.get_mut(&order.id) {
            None => Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found")),
            Some(stored) => {
                stored.status = order.status;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        let reference_taken = inner
            .payments
            .values()
            .any(|p| p.id != payment.id && p.processor_reference == payment.processor_reference);
        if reference_taken {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Processor reference already recorded",
            ));
        }
        inner.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;
        if !inner.payments.contains_key(&payment.id) {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            ));
        }
        inner.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.inner.read().await.payments.get(&id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, DomainError> {
        Ok(self
            .inner
            .read()
            .await
            .payments
            .values()
            .find(|p| p.processor_reference == reference)
            .cloned())
    }

    async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<Payment>, DomainError> {
        let mut payments: Vec<Payment> = self
            .inner
            .read()
            .await
            .payments
            .values()
            .filter(|p| p.order_id == order_id)
            .cloned()
            .collect();
        payments.sort_by_key(|p| (p.created_at, *p.id.as_uuid()));
        Ok(payments)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Payment>, DomainError> {
        let payments: Vec<Payment> = self
            .inner
            .read()
            .await
            .payments
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        Ok(page_after(
            payments,
            |p| (p.created_at, *p.id.as_uuid()),
            limit,
            cursor,
        ))
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn save_rating(&self, rating: &Rating) -> Result<(), DomainError> {
        self.inner.write().await.ratings.push(rating.clone());
        Ok(())
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        self.inner.write().await.comments.push(comment.clone());
        Ok(())
    }

    async fn list_ratings(&self, product_id: ProductId) -> Result<Vec<Rating>, DomainError> {
        let mut ratings: Vec<Rating> = self
            .inner
            .read()
            .await
            .ratings
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ratings)
    }

    async fn list_comments(&self, product_id: ProductId) -> Result<Vec<Comment>, DomainError> {
        let mut comments: Vec<Comment> = self
            .inner
            .read()
            .await
            .comments
            .iter()
            .filter(|c| c.product_id == product_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }
}

#[async_trait]
impl CheckoutStore for MemoryStore {
    async fn commit_checkout(
        &self,
        order: &Order,
        drained_items: &[CartItemId],
    ) -> Result<(), CheckoutCommitError> {
        let mut inner = self.inner.write().await;

        // Validate every decrement before applying any: the write lock is
        // held for the whole commit, so this check-then-apply is atomic.
        for item in &order.items {
            let product = inner.products.get(&item.product_id).ok_or_else(|| {
                CheckoutCommitError::StockConflict {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    requested: item.quantity,
                    available: 0,
                }
            })?;
            if !product.has_stock_for(item.quantity) {
                return Err(CheckoutCommitError::StockConflict {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    requested: item.quantity,
                    available: product.amount_in_stock,
                });
            }
        }

        for item in &order.items {
            let product = inner
                .products
                .get_mut(&item.product_id)
                .expect("validated above while holding the lock");
            product
                .take_stock(item.quantity)
                .expect("validated above while holding the lock");
        }

        inner.orders.insert(order.id, order.clone());
        for item_id in drained_items {
            inner.cart_items.remove(item_id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use crate::domain::foundation::{Currency, Money};
    use crate::domain::order::OrderItem;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    fn test_product(name: &str, stock: u32) -> Product {
        Product::new(
            ProductId::new(),
            name,
            None,
            Money::from_cents(999, Currency::Usd),
            stock,
            CategoryId::new(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn category_save_rejects_duplicate_name() {
        let store = MemoryStore::new();
        let a = Category::new(CategoryId::new(), "Electronics").unwrap();
        let b = Category::new(CategoryId::new(), "electronics").unwrap();

        CategoryRepository::save(&store, &a).await.unwrap();
        let result = CategoryRepository::save(&store, &b).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cascade_delete_removes_descendants() {
        let store = MemoryStore::new();
        let category = Category::new(CategoryId::new(), "Electronics").unwrap();
        CategoryRepository::save(&store, &category).await.unwrap();

        let sub = SubCategory::new(SubCategoryId::new(), "Laptops", category.id).unwrap();
        SubCategoryRepository::save(&store, &sub).await.unwrap();

        let mut product = test_product("Ultrabook", 3);
        product.category_id = category.id;
        product.sub_category_id = Some(sub.id);
        ProductRepository::save(&store, &product).await.unwrap();

        let summary = store.delete_cascade(category.id).await.unwrap();

        assert_eq!(summary.sub_categories_deleted, 1);
        assert_eq!(summary.products_deleted, 1);
        assert_eq!(summary.total_deleted(), 3);
        assert!(CategoryRepository::find_by_id(&store, category.id)
            .await
            .unwrap()
            .is_none());
        assert!(SubCategoryRepository::find_by_id(&store, sub.id)
            .await
            .unwrap()
            .is_none());
        assert!(ProductRepository::find_by_id(&store, product.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn sub_category_delete_detaches_products() {
        let store = MemoryStore::new();
        let category_id = CategoryId::new();
        let sub = SubCategory::new(SubCategoryId::new(), "Laptops", category_id).unwrap();
        SubCategoryRepository::save(&store, &sub).await.unwrap();

        let mut product = test_product("Ultrabook", 3);
        product.category_id = category_id;
        product.sub_category_id = Some(sub.id);
        ProductRepository::save(&store, &product).await.unwrap();

        let detached = store.delete_detaching_products(sub.id).await.unwrap();

        assert_eq!(detached, 1);
        let stored = ProductRepository::find_by_id(&store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.sub_category_id.is_none());
    }

    #[tokio::test]
    async fn find_or_create_returns_same_cart() {
        let store = MemoryStore::new();
        let user_id = test_user_id();

        let first = store.find_or_create(&user_id).await.unwrap();
        let second = store.find_or_create(&user_id).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn delete_item_is_idempotent() {
        let store = MemoryStore::new();
        let item = CartItem::new(CartItemId::new(), CartId::new(), ProductId::new(), 1).unwrap();
        store.save_item(&item).await.unwrap();

        store.delete_item(item.id).await.unwrap();
        store.delete_item(item.id).await.unwrap();
    }

    #[tokio::test]
    async fn checkout_commit_decrements_stock_and_drains_cart() {
        let store = MemoryStore::new();
        let product = test_product("Widget", 5);
        ProductRepository::save(&store, &product).await.unwrap();

        let cart = store.find_or_create(&test_user_id()).await.unwrap();
        let cart_item = CartItem::new(CartItemId::new(), cart.id, product.id, 2).unwrap();
        store.save_item(&cart_item).await.unwrap();

        let order_id = OrderId::new();
        let order = Order::new(
            order_id,
            test_user_id(),
            vec![OrderItem::freeze(order_id, &cart_item, &product)],
        );

        store.commit_checkout(&order, &[cart_item.id]).await.unwrap();

        let stored_product = ProductRepository::find_by_id(&store, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_product.amount_in_stock, 3);
        assert_eq!(store.cart_item_count().await, 0);
        assert!(OrderRepository::find_by_id(&store, order_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn checkout_commit_rolls_back_on_stock_conflict() {
        let store = MemoryStore::new();
        let scarce = test_product("Scarce", 1);
        let plenty = test_product("Plenty", 10);
        ProductRepository::save(&store, &scarce).await.unwrap();
        ProductRepository::save(&store, &plenty).await.unwrap();

        let cart = store.find_or_create(&test_user_id()).await.unwrap();
        let plenty_item = CartItem::new(CartItemId::new(), cart.id, plenty.id, 2).unwrap();
        let scarce_item = CartItem::new(CartItemId::new(), cart.id, scarce.id, 2).unwrap();
        store.save_item(&plenty_item).await.unwrap();
        store.save_item(&scarce_item).await.unwrap();

        let order_id = OrderId::new();
        let order = Order::new(
            order_id,
            test_user_id(),
            vec![
                OrderItem::freeze(order_id, &plenty_item, &plenty),
                OrderItem::freeze(order_id, &scarce_item, &scarce),
            ],
        );

        let result = store
            .commit_checkout(&order, &[plenty_item.id, scarce_item.id])
            .await;

        assert!(matches!(
            result,
            Err(CheckoutCommitError::StockConflict { ref product_name, .. })
                if product_name == "Scarce"
        ));
        // Nothing was applied: stock untouched, cart intact, no order.
        let stored_plenty = ProductRepository::find_by_id(&store, plenty.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_plenty.amount_in_stock, 10);
        assert_eq!(store.cart_item_count().await, 2);
        assert!(OrderRepository::find_by_id(&store, order_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn order_listing_paginates_with_cursor() {
        let store = MemoryStore::new();
        let user_id = test_user_id();
        for _ in 0..5 {
            let order = Order::new(OrderId::new(), user_id.clone(), vec![]);
            store.inner.write().await.orders.insert(order.id, order);
        }

        let first_page = OrderRepository::list_by_user(&store, &user_id, 2, None)
            .await
            .unwrap();
        assert_eq!(first_page.len(), 2);
        assert!(first_page[0].created_at >= first_page[1].created_at);

        let cursor = Cursor::new(first_page[1].created_at, *first_page[1].id.as_uuid());
        let second_page = OrderRepository::list_by_user(&store, &user_id, 10, Some(cursor))
            .await
            .unwrap();
        assert_eq!(second_page.len(), 3);
        for order in &second_page {
            assert!(!first_page.iter().any(|o| o.id == order.id));
        }
    }

    #[tokio::test]
    async fn payment_save_rejects_duplicate_reference() {
        let store = MemoryStore::new();
        let a = Payment::new(
            PaymentId::new(),
            OrderId::new(),
            test_user_id(),
            Money::from_cents(100, Currency::Usd),
            "pi_dup",
        );
        let b = Payment::new(
            PaymentId::new(),
            OrderId::new(),
            test_user_id(),
            Money::from_cents(200, Currency::Usd),
            "pi_dup",
        );

        PaymentRepository::save(&store, &a).await.unwrap();
        assert!(PaymentRepository::save(&store, &b).await.is_err());
    }
}
