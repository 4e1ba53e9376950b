//! PostgreSQL implementation of CartRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::foundation::{
    CartId, CartItemId, DomainError, ErrorCode, ProductId, Timestamp, UserId,
};
use crate::ports::CartRepository;

/// PostgreSQL implementation of the CartRepository port.
pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    user_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CartRow> for Cart {
    type Error = DomainError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        Ok(Cart {
            id: CartId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: Uuid,
    cart_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        CartItem {
            id: CartItemId::from_uuid(row.id),
            cart_id: CartId::from_uuid(row.cart_id),
            product_id: ProductId::from_uuid(row.product_id),
            quantity: row.quantity.max(0) as u32,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_or_create(&self, user_id: &UserId) -> Result<Cart, DomainError> {
        // Upsert against the user_id unique constraint so concurrent first
        // adds converge on one cart.
        let cart = Cart::new(CartId::new(), user_id.clone());
        let row: CartRow = sqlx::query_as(
            r#"
            INSERT INTO carts (id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(cart.id.as_uuid())
        .bind(user_id.as_str())
        .bind(cart.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to materialize cart: {}", e))
        })?;

        Cart::try_from(row)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, DomainError> {
        let row: Option<CartRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find cart: {}", e))
        })?;

        row.map(Cart::try_from).transpose()
    }

    async fn list_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, DomainError> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list cart items: {}", e))
        })?;

        Ok(rows.into_iter().map(CartItem::from).collect())
    }

    async fn find_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        let row: Option<CartItemRow> = sqlx::query_as(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE id = $1 AND cart_id = $2
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(cart_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find cart item: {}", e))
        })?;

        Ok(row.map(CartItem::from))
    }

    async fn find_item_for_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, DomainError> {
        let row: Option<CartItemRow> = sqlx::query_as(
            r#"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id.as_uuid())
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find cart item: {}", e))
        })?;

        Ok(row.map(CartItem::from))
    }

    async fn save_item(&self, item: &CartItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, cart_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.cart_id.as_uuid())
        .bind(item.product_id.as_uuid())
        .bind(item.quantity as i32)
        .bind(item.created_at.as_datetime())
        .bind(item.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("cart_items_cart_id_product_id_key") {
                    return DomainError::new(
                        ErrorCode::ValidationFailed,
                        "Product is already in the cart",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save cart item: {}", e))
        })?;

        Ok(())
    }

    async fn update_item(&self, item: &CartItem) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE cart_items SET quantity = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.quantity as i32)
        .bind(item.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update cart item: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CartItemNotFound,
                "Cart item not found",
            ));
        }

        Ok(())
    }

    async fn delete_item(&self, item_id: CartItemId) -> Result<(), DomainError> {
        // Idempotent on purpose: zero affected rows is fine.
        sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete cart item: {}", e),
                )
            })?;

        Ok(())
    }

    async fn delete_items(&self, item_ids: &[CartItemId]) -> Result<(), DomainError> {
        let uuids: Vec<Uuid> = item_ids.iter().map(|id| *id.as_uuid()).collect();
        sqlx::query("DELETE FROM cart_items WHERE id = ANY($1)")
            .bind(&uuids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete cart items: {}", e),
                )
            })?;

        Ok(())
    }
}
