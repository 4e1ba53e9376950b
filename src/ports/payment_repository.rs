//! Port for payment persistence.

use async_trait::async_trait;

use crate::domain::foundation::{Cursor, DomainError, OrderId, PaymentId, UserId};
use crate::domain::payment::Payment;

/// Persistence port for the payment ledger.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persists a new payment attempt.
    ///
    /// # Errors
    ///
    /// Fails if the processor reference is already recorded (unique
    /// constraint) or on infrastructure failure.
    async fn save(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Persists a settlement status change.
    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Looks a payment up by its opaque processor reference.
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, DomainError>;

    /// Payments recorded against an order, oldest first.
    async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<Payment>, DomainError>;

    /// A user's payments, `created_at` descending with id tie-break.
    ///
    /// Same pagination contract as order listing.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Payment>, DomainError>;
}
