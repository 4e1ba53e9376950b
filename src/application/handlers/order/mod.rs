//! Order operation handlers.

mod advance_status;
mod checkout;
mod list_orders;

pub use advance_status::{AdvanceOrderStatusCommand, AdvanceOrderStatusHandler};
pub use checkout::{CheckoutCommand, CheckoutHandler};
pub use list_orders::{ListOrdersHandler, ListOrdersQuery};
