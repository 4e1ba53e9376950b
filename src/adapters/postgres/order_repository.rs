//! PostgreSQL implementation of OrderRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    Cursor, DomainError, ErrorCode, Money, OrderId, OrderItemId, ProductId, Timestamp, UserId,
};
use crate::domain::order::{Order, OrderItem, OrderStatus};
use crate::ports::OrderRepository;

use super::product_repository::parse_currency;

/// PostgreSQL implementation of the OrderRepository port.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, order_ids: &[Uuid]) -> Result<Vec<OrderItemRow>, DomainError> {
        sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, product_name, quantity, unit_price_cents, currency
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load order items: {}", e))
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    product_name: String,
    quantity: i32,
    unit_price_cents: i64,
    currency: String,
}

pub(crate) fn parse_order_status(s: &str) -> Result<OrderStatus, DomainError> {
    OrderStatus::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid order status: {}", s))
    })
}

fn hydrate(row: OrderRow, item_rows: Vec<OrderItemRow>) -> Result<Order, DomainError> {
    let mut items = Vec::with_capacity(item_rows.len());
    for item in item_rows {
        let currency = parse_currency(&item.currency)?;
        items.push(OrderItem {
            id: OrderItemId::from_uuid(item.id),
            order_id: OrderId::from_uuid(item.order_id),
            product_id: ProductId::from_uuid(item.product_id),
            product_name: item.product_name,
            quantity: item.quantity.max(0) as u32,
            unit_price: Money::from_cents(item.unit_price_cents, currency),
        });
    }

    Ok(Order {
        id: OrderId::from_uuid(row.id),
        user_id: UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        status: parse_order_status(&row.status)?,
        items,
        created_at: Timestamp::from_datetime(row.created_at),
    })
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find order: {}", e))
        })?;

        match row {
            None => Ok(None),
            Some(row) => {
                let items = self.load_items(&[row.id]).await?;
                Ok(Some(hydrate(row, items)?))
            }
        }
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = match cursor {
            None => sqlx::query_as(
                r#"
                SELECT id, user_id, status, created_at
                FROM orders
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(user_id.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await,
            Some(cursor) => sqlx::query_as(
                r#"
                SELECT id, user_id, status, created_at
                FROM orders
                WHERE user_id = $1 AND (created_at, id) < ($2, $3)
                ORDER BY created_at DESC, id DESC
                LIMIT $4
                "#,
            )
            .bind(user_id.as_str())
            .bind(cursor.created_at.as_datetime())
            .bind(cursor.id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list orders: {}", e))
        })?;

        let order_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut items_by_order: std::collections::HashMap<Uuid, Vec<OrderItemRow>> =
            std::collections::HashMap::new();
        for item in self.load_items(&order_ids).await? {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                hydrate(row, items)
            })
            .collect()
    }

    async fn update_status(&self, order: &Order) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
            .bind(order.id.as_uuid())
            .bind(order.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to update order status: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }

        Ok(())
    }
}
