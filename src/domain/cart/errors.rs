//! Cart-specific error types.

use crate::domain::foundation::{
    AuthError, CartItemId, DomainError, ErrorCode, ProductId, ValidationError,
};

/// Errors raised by cart operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Referenced product does not exist.
    ProductNotFound(ProductId),

    /// Referenced cart item does not exist in the caller's cart.
    ItemNotFound(CartItemId),

    /// Requested quantity exceeds the product's available stock.
    OutOfStock {
        product_id: ProductId,
        product_name: String,
        requested: u32,
        available: u32,
    },

    /// No verified identity was supplied.
    AuthRequired,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CartError {
    pub fn product_not_found(id: ProductId) -> Self {
        CartError::ProductNotFound(id)
    }

    pub fn item_not_found(id: CartItemId) -> Self {
        CartError::ItemNotFound(id)
    }

    pub fn out_of_stock(
        product_id: ProductId,
        product_name: impl Into<String>,
        requested: u32,
        available: u32,
    ) -> Self {
        CartError::OutOfStock {
            product_id,
            product_name: product_name.into(),
            requested,
            available,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CartError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CartError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CartError::ItemNotFound(_) => ErrorCode::CartItemNotFound,
            CartError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CartError::AuthRequired => ErrorCode::AuthRequired,
            CartError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CartError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-displayable message.
    pub fn message(&self) -> String {
        match self {
            CartError::ProductNotFound(id) => format!("Product not found: {}", id),
            CartError::ItemNotFound(id) => format!("Cart item not found: {}", id),
            CartError::OutOfStock {
                product_name,
                requested,
                available,
                ..
            } => format!(
                "'{}' has only {} in stock ({} requested)",
                product_name, available, requested
            ),
            CartError::AuthRequired => "Authentication required".to_string(),
            CartError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CartError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CartError {}

impl From<ValidationError> for CartError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        CartError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for CartError {
    fn from(_: AuthError) -> Self {
        CartError::AuthRequired
    }
}

impl From<DomainError> for CartError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AuthRequired => CartError::AuthRequired,
            _ => CartError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CartError> for DomainError {
    fn from(err: CartError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
