//! UpdateCartItemQuantityHandler - atomically replaces an item's quantity.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::cart::{CartError, CartItem};
use crate::domain::foundation::{AuthContext, CartItemId, ValidationError};
use crate::ports::{CartRepository, ProductRepository};

/// Command to replace a cart item's quantity.
#[derive(Debug, Clone)]
pub struct UpdateCartItemQuantityCommand {
    pub auth: AuthContext,
    pub cart_item_id: CartItemId,
    pub new_quantity: u32,
}

/// Handler for quantity updates.
pub struct UpdateCartItemQuantityHandler {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl UpdateCartItemQuantityHandler {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }

    pub async fn handle(
        &self,
        cmd: UpdateCartItemQuantityCommand,
    ) -> Result<MutationResult<CartItem>, CartError> {
        let user = cmd.auth.require()?;

        if cmd.new_quantity < 1 {
            return Err(ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0).into());
        }

        // Items are only addressable through the caller's own cart, so a
        // foreign item id looks exactly like a missing one.
        let cart = self
            .carts
            .find_by_user(&user.id)
            .await?
            .ok_or_else(|| CartError::item_not_found(cmd.cart_item_id))?;
        let mut item = self
            .carts
            .find_item(cart.id, cmd.cart_item_id)
            .await?
            .ok_or_else(|| CartError::item_not_found(cmd.cart_item_id))?;

        let product = match self.products.find_by_id(item.product_id).await? {
            Some(product) => product,
            None => {
                // The product vanished under the item: reconcile it away.
                self.carts.delete_item(item.id).await?;
                return Err(CartError::product_not_found(item.product_id));
            }
        };

        if !product.has_stock_for(cmd.new_quantity) {
            return Err(CartError::out_of_stock(
                product.id,
                product.name,
                cmd.new_quantity,
                product.amount_in_stock,
            ));
        }

        item.set_quantity(cmd.new_quantity)?;
        self.carts.update_item(&item).await?;

        Ok(MutationResult::ok(item))
    }
}
