//! Order-specific error types.

use crate::domain::foundation::{
    AuthError, DomainError, ErrorCode, OrderId, ProductId, ValidationError,
};

use super::OrderStatus;

/// Errors raised by order operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Referenced order does not exist (or belongs to another user).
    NotFound(OrderId),

    /// Checkout was attempted with an empty cart.
    EmptyCart,

    /// An item exceeds the product's available stock.
    OutOfStock {
        product_id: ProductId,
        product_name: String,
        requested: u32,
        available: u32,
    },

    /// The requested status change is not a legal transition.
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// No verified identity was supplied.
    AuthRequired,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl OrderError {
    pub fn not_found(id: OrderId) -> Self {
        OrderError::NotFound(id)
    }

    pub fn out_of_stock(
        product_id: ProductId,
        product_name: impl Into<String>,
        requested: u32,
        available: u32,
    ) -> Self {
        OrderError::OutOfStock {
            product_id,
            product_name: product_name.into(),
            requested,
            available,
        }
    }

    pub fn invalid_transition(from: OrderStatus, to: OrderStatus) -> Self {
        OrderError::InvalidTransition { from, to }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        OrderError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::EmptyCart => ErrorCode::EmptyCart,
            OrderError::OutOfStock { .. } => ErrorCode::OutOfStock,
            OrderError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            OrderError::AuthRequired => ErrorCode::AuthRequired,
            OrderError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            OrderError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-displayable message.
    pub fn message(&self) -> String {
        match self {
            OrderError::NotFound(id) => format!("Order not found: {}", id),
            OrderError::EmptyCart => "Cannot check out an empty cart".to_string(),
            OrderError::OutOfStock {
                product_name,
                requested,
                available,
                ..
            } => format!(
                "'{}' has only {} in stock ({} requested)",
                product_name, available, requested
            ),
            OrderError::InvalidTransition { from, to } => {
                format!("Cannot move order from {} to {}", from.as_str(), to.as_str())
            }
            OrderError::AuthRequired => "Authentication required".to_string(),
            OrderError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            OrderError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OrderError {}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        OrderError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for OrderError {
    fn from(_: AuthError) -> Self {
        OrderError::AuthRequired
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AuthRequired => OrderError::AuthRequired,
            _ => OrderError::Infrastructure(err.to_string()),
        }
    }
}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
