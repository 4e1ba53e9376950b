//! Port for the atomic checkout commit.
//!
//! Checkout has four effects that must land together: order insertion,
//! order item snapshots, guarded stock decrements, and cart draining. This
//! port owns that single transaction; everything before it (reconciliation,
//! snapshotting) is pure and retryable.

use async_trait::async_trait;

use crate::domain::foundation::{CartItemId, DomainError, ProductId};
use crate::domain::order::Order;

/// Why a checkout commit did not happen.
#[derive(Debug, Clone)]
pub enum CheckoutCommitError {
    /// A guarded stock decrement found less stock than the order needs.
    ///
    /// This is the concurrent-checkout loser path: between re-validation
    /// and commit another order took the stock. Nothing was persisted.
    StockConflict {
        product_id: ProductId,
        product_name: String,
        requested: u32,
        available: u32,
    },

    /// The storage layer failed; the transaction rolled back.
    Storage(DomainError),
}

impl From<DomainError> for CheckoutCommitError {
    fn from(err: DomainError) -> Self {
        CheckoutCommitError::Storage(err)
    }
}

/// Transactional store for checkout.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    /// Atomically commits a checkout.
    ///
    /// In one transaction: decrements each ordered product's stock with a
    /// conditional update that refuses to go below zero, inserts the order
    /// and its frozen items, and deletes the drained cart items. Two
    /// concurrent commits over the same product serialize on the decrement;
    /// the loser rolls back with `StockConflict` and never oversells.
    async fn commit_checkout(
        &self,
        order: &Order,
        drained_items: &[CartItemId],
    ) -> Result<(), CheckoutCommitError>;
}
