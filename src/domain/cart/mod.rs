//! Cart - per-user mutable selection of products, bounded by live stock.

mod aggregate;
mod errors;
mod reconcile;

pub use aggregate::{Cart, CartItem};
pub use errors::CartError;
pub use reconcile::{reconcile, Reconciliation, StockShortfall};
