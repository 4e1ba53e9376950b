//! Payment-specific error types.

use crate::domain::foundation::{
    AuthError, DomainError, ErrorCode, Money, OrderId, PaymentId, ValidationError,
};

use super::WebhookError;

/// Errors raised by payment operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Referenced order does not exist or belongs to another user.
    OrderNotFound(OrderId),

    /// Referenced payment does not exist.
    NotFound(PaymentId),

    /// No payment carries this processor reference.
    ReferenceNotFound(String),

    /// The tendered amount does not equal the order total.
    AmountMismatch { expected: Money, actual: Money },

    /// The payment has already settled and cannot change outcome.
    AlreadySettled(PaymentId),

    /// The processor callback could not be authenticated.
    InvalidWebhookSignature,

    /// The external processor rejected or failed the request.
    ProviderError(String),

    /// No verified identity was supplied.
    AuthRequired,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl PaymentError {
    pub fn order_not_found(id: OrderId) -> Self {
        PaymentError::OrderNotFound(id)
    }

    pub fn not_found(id: PaymentId) -> Self {
        PaymentError::NotFound(id)
    }

    pub fn reference_not_found(reference: impl Into<String>) -> Self {
        PaymentError::ReferenceNotFound(reference.into())
    }

    pub fn amount_mismatch(expected: Money, actual: Money) -> Self {
        PaymentError::AmountMismatch { expected, actual }
    }

    pub fn already_settled(id: PaymentId) -> Self {
        PaymentError::AlreadySettled(id)
    }

    pub fn provider_error(message: impl Into<String>) -> Self {
        PaymentError::ProviderError(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            PaymentError::NotFound(_) | PaymentError::ReferenceNotFound(_) => {
                ErrorCode::PaymentNotFound
            }
            PaymentError::AmountMismatch { .. } => ErrorCode::ValidationFailed,
            PaymentError::AlreadySettled(_) => ErrorCode::InvalidStateTransition,
            PaymentError::InvalidWebhookSignature => ErrorCode::InvalidWebhookSignature,
            PaymentError::ProviderError(_) => ErrorCode::PaymentProviderError,
            PaymentError::AuthRequired => ErrorCode::AuthRequired,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-displayable message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::OrderNotFound(id) => format!("Order not found: {}", id),
            PaymentError::NotFound(id) => format!("Payment not found: {}", id),
            PaymentError::ReferenceNotFound(reference) => {
                format!("No payment matches processor reference '{}'", reference)
            }
            PaymentError::AmountMismatch { expected, actual } => format!(
                "Payment amount {} does not match order total {}",
                actual, expected
            ),
            PaymentError::AlreadySettled(id) => {
                format!("Payment {} has already settled", id)
            }
            PaymentError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            PaymentError::ProviderError(msg) => format!("Payment provider error: {}", msg),
            PaymentError::AuthRequired => "Authentication required".to_string(),
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        PaymentError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for PaymentError {
    fn from(_: AuthError) -> Self {
        PaymentError::AuthRequired
    }
}

impl From<WebhookError> for PaymentError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::ParseError(msg) => PaymentError::validation("payload", msg),
            _ => PaymentError::InvalidWebhookSignature,
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AuthRequired => PaymentError::AuthRequired,
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
