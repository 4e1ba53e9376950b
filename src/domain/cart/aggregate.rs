//! Cart and CartItem entities.
//!
//! A cart is lazily materialized on the first add and never auto-deleted.
//! At most one CartItem exists per (cart, product) pair; adding an already
//! carted product merges quantities instead of duplicating the row.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CartId, CartItemId, ProductId, Timestamp, UserId, ValidationError};

/// A user's cart. One active cart per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

impl Cart {
    /// Creates a cart for a user.
    pub fn new(id: CartId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            created_at: Timestamp::now(),
        }
    }
}

/// A (product, quantity) line in a cart.
///
/// # Invariants
///
/// - `quantity >= 1`
/// - bounded by the product's stock at the moment of add/update (may go
///   stale afterwards; checkout re-validates)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItem {
    /// Creates a cart item with a positive quantity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `quantity` is zero.
    pub fn new(
        id: CartItemId,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            cart_id,
            product_id,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the quantity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the new quantity is zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0));
        }
        self.quantity = quantity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Merges an additional quantity into this item.
    pub fn add_quantity(&mut self, quantity: u32) {
        self.quantity += quantity;
        self.updated_at = Timestamp::now();
    }
}
