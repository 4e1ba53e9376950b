//! Errors raised while verifying processor callbacks.

use thiserror::Error;

/// Webhook verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The signature does not match the payload.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// The event is older than the replay window allows.
    #[error("Webhook timestamp outside acceptable range")]
    TimestampOutOfRange,

    /// The event timestamp lies in the future beyond clock-skew tolerance.
    #[error("Webhook timestamp is invalid")]
    InvalidTimestamp,

    /// The header or payload could not be parsed.
    #[error("Failed to parse webhook: {0}")]
    ParseError(String),
}
