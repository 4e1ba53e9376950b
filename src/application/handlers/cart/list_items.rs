//! ListCartItemsHandler - the cart read path with lazy reconciliation.
//!
//! Items whose product has been deleted are filtered out and their rows
//! removed. Stock shrink is NOT corrected here: a stale item may still
//! show a quantity above current stock, and checkout re-validates.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::cart::{reconcile, CartError, CartItem};
use crate::domain::catalog::Product;
use crate::domain::foundation::{AuthContext, ProductId};
use crate::ports::{CartRepository, ProductRepository};

/// One cart line joined with its product.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

/// Handler for the cart contents query.
pub struct ListCartItemsHandler {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ListCartItemsHandler {
    pub fn new(carts: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { carts, products }
    }

    pub async fn handle(&self, auth: AuthContext) -> Result<Vec<CartLine>, CartError> {
        let user = auth.require()?;

        let cart = match self.carts.find_by_user(&user.id).await? {
            Some(cart) => cart,
            None => return Ok(Vec::new()),
        };

        let items = self.carts.list_items(cart.id).await?;
        let product_ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<ProductId, Product> = self
            .products
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let outcome = reconcile(&items, &products);

        if !outcome.dropped.is_empty() {
            tracing::debug!(
                cart_id = %cart.id,
                dropped = outcome.dropped.len(),
                "reconciled deleted products out of cart"
            );
            self.carts.delete_items(&outcome.dropped).await?;
        }

        Ok(outcome
            .valid
            .into_iter()
            .filter_map(|item| {
                products
                    .get(&item.product_id)
                    .cloned()
                    .map(|product| CartLine { item, product })
            })
            .collect())
    }
}
