//! Ratings and comments attached to products.
//!
//! Informational only: the ordering flow reads them but never couples an
//! invariant to them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, ProductId, RatingId, Timestamp, UserId, ValidationError};

/// Star rating a user left on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Stars, 1 through 5 inclusive.
    pub stars: u8,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Rating {
    /// Creates a rating, validating the star range.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `stars` is outside 1..=5.
    pub fn new(
        id: RatingId,
        product_id: ProductId,
        user_id: UserId,
        stars: u8,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&stars) {
            return Err(ValidationError::out_of_range("stars", 1, 5, i64::from(stars)));
        }
        Ok(Self {
            id,
            product_id,
            user_id,
            stars,
            comment,
            created_at: Timestamp::now(),
        })
    }
}

/// Free-form user comment on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl Comment {
    /// Creates a comment with a non-empty body.
    pub fn new(
        id: CommentId,
        product_id: ProductId,
        user_id: UserId,
        body: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::empty_field("body"));
        }
        Ok(Self {
            id,
            product_id,
            user_id,
            body,
            created_at: Timestamp::now(),
        })
    }
}
