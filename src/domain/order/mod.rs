//! Order - immutable checkout records with a status lifecycle.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Order, OrderItem};
pub use errors::OrderError;
pub use status::OrderStatus;
