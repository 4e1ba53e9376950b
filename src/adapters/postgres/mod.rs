//! PostgreSQL adapters - sqlx implementations of the persistence ports.
//!
//! One adapter per port. The `PostgresCheckoutStore` owns the single
//! multi-entity transaction in the system.

mod cart_repository;
mod category_repository;
mod checkout;
mod order_repository;
mod payment_repository;
mod product_repository;
mod review_repository;
mod sub_category_repository;

pub use cart_repository::PostgresCartRepository;
pub use category_repository::PostgresCategoryRepository;
pub use checkout::PostgresCheckoutStore;
pub use order_repository::PostgresOrderRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use product_repository::PostgresProductRepository;
pub use review_repository::PostgresReviewRepository;
pub use sub_category_repository::PostgresSubCategoryRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Connects a pool from the database configuration, optionally running
/// migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    Ok(pool)
}
