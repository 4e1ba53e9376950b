//! AddCartItemHandler - puts a product into the caller's cart.
//!
//! The cart materializes lazily on the first add. Adding an already carted
//! product merges quantities; the merged quantity is bounded by the
//! product's live stock.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::cart::{CartError, CartItem};
use crate::domain::foundation::{AuthContext, CartItemId, ProductId, ValidationError};
use crate::ports::{CartRepository, ProductRepository};

/// Command to add a product to the cart.
#[derive(Debug, Clone)]
pub struct AddCartItemCommand {
    pub auth: AuthContext,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Handler for adding cart items.
pub struct AddCartItemHandler {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl AddCartItemHandler {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }

    pub async fn handle(
        &self,
        cmd: AddCartItemCommand,
    ) -> Result<MutationResult<CartItem>, CartError> {
        let user = cmd.auth.require()?;

        if cmd.quantity < 1 {
            return Err(ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0).into());
        }

        let product = self
            .products
            .find_by_id(cmd.product_id)
            .await?
            .ok_or_else(|| CartError::product_not_found(cmd.product_id))?;

        let cart = self.carts.find_or_create(&user.id).await?;

        // At most one item per (cart, product): merge instead of duplicating.
        let item = match self
            .carts
            .find_item_for_product(cart.id, cmd.product_id)
            .await?
        {
            Some(mut existing) => {
                let merged = existing.quantity + cmd.quantity;
                if !product.has_stock_for(merged) {
                    return Err(CartError::out_of_stock(
                        product.id,
                        product.name,
                        merged,
                        product.amount_in_stock,
                    ));
                }
                existing.add_quantity(cmd.quantity);
                self.carts.update_item(&existing).await?;
                existing
            }
            None => {
                if !product.has_stock_for(cmd.quantity) {
                    return Err(CartError::out_of_stock(
                        product.id,
                        product.name,
                        cmd.quantity,
                        product.amount_in_stock,
                    ));
                }
                let item = CartItem::new(CartItemId::new(), cart.id, cmd.product_id, cmd.quantity)?;
                self.carts.save_item(&item).await?;
                item
            }
        };

        Ok(MutationResult::ok(item))
    }
}
