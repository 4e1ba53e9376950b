//! Cart operation handlers.

mod add_item;
mod list_items;
mod remove_item;
mod update_quantity;

pub use add_item::{AddCartItemCommand, AddCartItemHandler};
pub use list_items::{CartLine, ListCartItemsHandler};
pub use remove_item::{RemoveCartItemCommand, RemoveCartItemHandler};
pub use update_quantity::{UpdateCartItemQuantityCommand, UpdateCartItemQuantityHandler};
