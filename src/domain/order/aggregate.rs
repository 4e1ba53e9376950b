//! Order aggregate.
//!
//! An order is the immutable record of a checkout: its items freeze the
//! product id, name, quantity, and unit price at creation. Only `status`
//! advances afterwards, following the state machine in `status.rs`.

use serde::{Deserialize, Serialize};

use crate::domain::cart::CartItem;
use crate::domain::catalog::Product;
use crate::domain::foundation::{
    Currency, Money, OrderId, OrderItemId, ProductId, StateMachine, Timestamp, UserId,
    ValidationError,
};

use super::OrderStatus;

/// Frozen snapshot of a cart line at checkout time.
///
/// Later changes to the product's price or stock never alter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Product name at time of order.
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at time of order.
    pub unit_price: Money,
}

impl OrderItem {
    /// Snapshots a cart item against the product's current state.
    pub fn freeze(order_id: OrderId, item: &CartItem, product: &Product) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: item.quantity,
            unit_price: product.price,
        }
    }

    /// Total for this line: unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
}

impl Order {
    /// Creates an order in the initial `Created` state.
    pub fn new(id: OrderId, user_id: UserId, items: Vec<OrderItem>) -> Self {
        Self {
            id,
            user_id,
            status: OrderStatus::Created,
            items,
            created_at: Timestamp::now(),
        }
    }

    /// Sum of line totals.
    ///
    /// Falls back to the order currency for an empty item list; checkout
    /// guarantees at least one item, so the fold never mixes currencies.
    pub fn total(&self) -> Money {
        let currency = self
            .items
            .first()
            .map(|item| item.unit_price.currency)
            .unwrap_or(Currency::Usd);
        self.items
            .iter()
            .fold(Money::zero(currency), |acc, item| {
                Money::from_cents(acc.cents + item.line_total().cents, currency)
            })
    }

    /// Advances the status through the state machine.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for transitions the state graph forbids.
    /// A transition to the current status succeeds as a no-op.
    pub fn advance_status(&mut self, target: OrderStatus) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }

    /// Returns true if this order belongs to the given user.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
