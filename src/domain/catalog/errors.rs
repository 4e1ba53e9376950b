//! Catalog-specific error types.

use crate::domain::foundation::{
    AuthError, CategoryId, DomainError, ErrorCode, ProductId, SubCategoryId, ValidationError,
};

/// Errors raised by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Referenced category does not exist.
    CategoryNotFound(CategoryId),

    /// Referenced sub-category does not exist.
    SubCategoryNotFound(SubCategoryId),

    /// Referenced product does not exist.
    ProductNotFound(ProductId),

    /// A category with this name already exists.
    NameTaken(String),

    /// The sub-category belongs to a different category than the product.
    SubCategoryOutsideCategory {
        sub_category_id: SubCategoryId,
        category_id: CategoryId,
    },

    /// Category deletion was attempted without explicit confirmation.
    CascadeNotConfirmed(CategoryId),

    /// No verified identity was supplied.
    AuthRequired,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn category_not_found(id: CategoryId) -> Self {
        CatalogError::CategoryNotFound(id)
    }

    pub fn sub_category_not_found(id: SubCategoryId) -> Self {
        CatalogError::SubCategoryNotFound(id)
    }

    pub fn product_not_found(id: ProductId) -> Self {
        CatalogError::ProductNotFound(id)
    }

    pub fn name_taken(name: impl Into<String>) -> Self {
        CatalogError::NameTaken(name.into())
    }

    pub fn sub_category_outside_category(
        sub_category_id: SubCategoryId,
        category_id: CategoryId,
    ) -> Self {
        CatalogError::SubCategoryOutsideCategory {
            sub_category_id,
            category_id,
        }
    }

    pub fn cascade_not_confirmed(id: CategoryId) -> Self {
        CatalogError::CascadeNotConfirmed(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::CategoryNotFound(_) => ErrorCode::CategoryNotFound,
            CatalogError::SubCategoryNotFound(_) => ErrorCode::SubCategoryNotFound,
            CatalogError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CatalogError::NameTaken(_) => ErrorCode::ValidationFailed,
            CatalogError::SubCategoryOutsideCategory { .. } => ErrorCode::ValidationFailed,
            CatalogError::CascadeNotConfirmed(_) => ErrorCode::CascadeNotConfirmed,
            CatalogError::AuthRequired => ErrorCode::AuthRequired,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-displayable message.
    pub fn message(&self) -> String {
        match self {
            CatalogError::CategoryNotFound(id) => format!("Category not found: {}", id),
            CatalogError::SubCategoryNotFound(id) => format!("Sub-category not found: {}", id),
            CatalogError::ProductNotFound(id) => format!("Product not found: {}", id),
            CatalogError::NameTaken(name) => {
                format!("A category named '{}' already exists", name)
            }
            CatalogError::SubCategoryOutsideCategory {
                sub_category_id,
                category_id,
            } => format!(
                "Sub-category {} does not belong to category {}",
                sub_category_id, category_id
            ),
            CatalogError::CascadeNotConfirmed(id) => format!(
                "Deleting category {} cascades to its sub-categories and products and must be confirmed",
                id
            ),
            CatalogError::AuthRequired => "Authentication required".to_string(),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        CatalogError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(_: AuthError) -> Self {
        CatalogError::AuthRequired
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::AuthRequired => CatalogError::AuthRequired,
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_not_found_codes() {
        assert_eq!(
            CatalogError::category_not_found(CategoryId::new()).code(),
            ErrorCode::CategoryNotFound
        );
        assert_eq!(
            CatalogError::product_not_found(ProductId::new()).code(),
            ErrorCode::ProductNotFound
        );
    }

    #[test]
    fn cascade_not_confirmed_names_category() {
        let id = CategoryId::new();
        let err = CatalogError::cascade_not_confirmed(id);
        assert!(err.message().contains(&id.to_string()));
        assert_eq!(err.code(), ErrorCode::CascadeNotConfirmed);
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: CatalogError = ValidationError::empty_field("name").into();
        assert!(matches!(
            err,
            CatalogError::ValidationFailed { ref field, .. } if field == "name"
        ));
    }

    #[test]
    fn auth_error_converts_to_auth_required() {
        let err: CatalogError = AuthError::AuthRequired.into();
        assert_eq!(err, CatalogError::AuthRequired);
        assert_eq!(err.code(), ErrorCode::AuthRequired);
    }

    #[test]
    fn converts_to_domain_error() {
        let err = CatalogError::name_taken("Electronics");
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn display_matches_message() {
        let err = CatalogError::AuthRequired;
        assert_eq!(format!("{}", err), err.message());
    }
}
