//! Port for cart persistence.

use async_trait::async_trait;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::foundation::{CartId, CartItemId, DomainError, ProductId, UserId};

/// Persistence port for carts and their items.
///
/// A cart is a lazily-materialized singleton per user: `find_or_create`
/// is the only way one comes into existence, and nothing deletes it.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Returns the user's cart, creating it on first use.
    async fn find_or_create(&self, user_id: &UserId) -> Result<Cart, DomainError>;

    /// Returns the user's cart if one has been materialized.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, DomainError>;

    /// Items in the cart, oldest first.
    async fn list_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, DomainError>;

    /// Fetches an item if it exists in this cart.
    async fn find_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Fetches the cart's item for a product, if any.
    ///
    /// At most one exists per (cart, product) pair.
    async fn find_item_for_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, DomainError>;

    async fn save_item(&self, item: &CartItem) -> Result<(), DomainError>;

    async fn update_item(&self, item: &CartItem) -> Result<(), DomainError>;

    /// Removes an item. Succeeds as a no-op when the item is already gone.
    async fn delete_item(&self, item_id: CartItemId) -> Result<(), DomainError>;

    /// Removes a batch of items (reconciliation drops, cart draining).
    async fn delete_items(&self, item_ids: &[CartItemId]) -> Result<(), DomainError>;
}
