//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence ports
//!
//! - `CategoryRepository` / `SubCategoryRepository` / `ProductRepository` -
//!   catalog hierarchy storage, including the cascading category delete
//! - `CartRepository` - per-user carts and their items
//! - `OrderRepository` / `PaymentRepository` - ordering and settlement
//!   history, cursor-paginated
//! - `ReviewRepository` - ratings and comments
//! - `CheckoutStore` - the one multi-entity atomic commit in the core
//!
//! ## External collaborator ports
//!
//! - `PaymentProcessor` - creates payment intents with the external
//!   processor; its callbacks enter through the webhook verifier

mod cart_repository;
mod category_repository;
mod checkout;
mod order_repository;
mod payment_processor;
mod payment_repository;
mod product_repository;
mod review_repository;
mod sub_category_repository;

pub use cart_repository::CartRepository;
pub use category_repository::{CascadeSummary, CategoryRepository};
pub use checkout::{CheckoutCommitError, CheckoutStore};
pub use order_repository::OrderRepository;
pub use payment_processor::{CreateIntentRequest, PaymentIntent, PaymentProcessor};
pub use payment_repository::PaymentRepository;
pub use product_repository::ProductRepository;
pub use review_repository::ReviewRepository;
pub use sub_category_repository::SubCategoryRepository;
