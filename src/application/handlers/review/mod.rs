//! Review operation handlers.

mod add_comment;
mod add_rating;

pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use add_rating::{AddRatingCommand, AddRatingHandler};
