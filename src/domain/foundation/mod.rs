//! Foundation - value objects and shared domain primitives.

mod auth;
mod errors;
mod ids;
mod money;
mod pagination;
mod state_machine;
mod timestamp;

pub use auth::{AuthContext, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    CartId, CartItemId, CategoryId, CommentId, OrderId, OrderItemId, PaymentId, ProductId,
    ProductImageId, RatingId, SubCategoryId, UserId,
};
pub use money::{Currency, Money};
pub use pagination::{Cursor, Page, PageInfo, PageRequest};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
