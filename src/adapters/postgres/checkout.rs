//! PostgreSQL implementation of the atomic checkout commit.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CartItemId, DomainError, ErrorCode};
use crate::domain::order::Order;
use crate::ports::{CheckoutCommitError, CheckoutStore};

/// PostgreSQL implementation of the CheckoutStore port.
///
/// All four checkout effects run in one transaction. Stock is taken with a
/// guarded conditional update; a concurrent checkout that already consumed
/// the stock makes the guard match zero rows, and the whole transaction
/// rolls back into a `StockConflict`.
pub struct PostgresCheckoutStore {
    pool: PgPool,
}

impl PostgresCheckoutStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> CheckoutCommitError {
    CheckoutCommitError::Storage(DomainError::new(
        ErrorCode::DatabaseError,
        format!("{}: {}", context, e),
    ))
}

#[async_trait]
impl CheckoutStore for PostgresCheckoutStore {
    async fn commit_checkout(
        &self,
        order: &Order,
        drained_items: &[CartItemId],
    ) -> Result<(), CheckoutCommitError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("Failed to begin checkout transaction", e))?;

        for item in &order.items {
            // Guarded decrement: refuses to go below zero. Row-level
            // locking serializes concurrent checkouts on the same product.
            let updated = sqlx::query(
                r#"
                UPDATE products
                SET amount_in_stock = amount_in_stock - $2, updated_at = NOW()
                WHERE id = $1 AND amount_in_stock >= $2
                "#,
            )
            .bind(item.product_id.as_uuid())
            .bind(item.quantity as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to decrement stock", e))?;

            if updated.rows_affected() == 0 {
                let available: Option<i32> =
                    sqlx::query_scalar("SELECT amount_in_stock FROM products WHERE id = $1")
                        .bind(item.product_id.as_uuid())
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(|e| storage_error("Failed to read stock", e))?;

                tracing::warn!(
                    product_id = %item.product_id,
                    requested = item.quantity,
                    available = available.unwrap_or(0),
                    "checkout lost the stock race"
                );

                // Dropping the transaction rolls back earlier decrements.
                return Err(CheckoutCommitError::StockConflict {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    requested: item.quantity,
                    available: available.unwrap_or(0).max(0) as u32,
                });
            }
        }

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_str())
        .bind(order.status.as_str())
        .bind(order.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| storage_error("Failed to insert order", e))?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name, quantity,
                    unit_price_cents, currency
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(item.order_id.as_uuid())
            .bind(item.product_id.as_uuid())
            .bind(&item.product_name)
            .bind(item.quantity as i32)
            .bind(item.unit_price.cents)
            .bind(item.unit_price.currency.code())
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to insert order item", e))?;
        }

        let drained: Vec<Uuid> = drained_items.iter().map(|id| *id.as_uuid()).collect();
        sqlx::query("DELETE FROM cart_items WHERE id = ANY($1)")
            .bind(&drained)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("Failed to drain cart", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("Failed to commit checkout", e))?;

        Ok(())
    }
}
