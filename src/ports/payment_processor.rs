//! Port for the external payment processor.
//!
//! The core never talks HTTP to the processor; this port abstracts intent
//! creation, and settlement comes back through the verified webhook.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Money, OrderId, UserId};

/// Request to open a payment intent with the processor.
#[derive(Debug, Clone)]
pub struct CreateIntentRequest {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Money,
    /// Idempotency key so a retried mutation cannot open two intents.
    pub idempotency_key: String,
}

/// Intent handle returned by the processor.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Opaque reference correlating webhook confirmations.
    pub reference: String,
    /// Client-side continuation token for the processor handshake.
    pub client_secret: String,
}

/// External payment processor port.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Opens a payment intent for the given amount.
    ///
    /// # Errors
    ///
    /// Returns a `PaymentProviderError`-coded failure when the processor
    /// rejects the request or cannot be reached.
    async fn create_intent(&self, request: CreateIntentRequest)
        -> Result<PaymentIntent, DomainError>;
}
