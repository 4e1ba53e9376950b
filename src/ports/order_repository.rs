//! Port for order persistence.

use async_trait::async_trait;

use crate::domain::foundation::{Cursor, DomainError, OrderId, UserId};
use crate::domain::order::Order;

/// Persistence port for orders.
///
/// Orders are only ever created through the `CheckoutStore` commit; this
/// port reads them and advances their status.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Fetches an order with its items.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// A user's orders, `created_at` descending with id tie-break.
    ///
    /// Returns up to `limit` orders strictly after `cursor` in that
    /// ordering. Callers overfetch by one to detect a next page.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Order>, DomainError>;

    /// Persists a status change. Items are immutable and never updated.
    async fn update_status(&self, order: &Order) -> Result<(), DomainError>;
}
