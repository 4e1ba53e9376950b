//! PostgreSQL implementation of CategoryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::Category;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, Timestamp};
use crate::ports::{CascadeSummary, CategoryRepository};

/// PostgreSQL implementation of the CategoryRepository port.
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn map_name_conflict(e: sqlx::Error, name: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("categories_name_key") {
            return DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Category name '{}' already exists", name),
            )
            .with_detail("field", "name");
        }
    }
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to save category: {}", e))
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn save(&self, category: &Category) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.created_at.as_datetime())
        .bind(category.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &category.name))?;

        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &category.name))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find category: {}", e))
        })?;

        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE LOWER(name) = LOWER($1)
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find category: {}", e))
        })?;

        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list categories: {}", e))
        })?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn delete_cascade(&self, id: CategoryId) -> Result<CascadeSummary, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        // Collect the descendant set first so the cascade works over one
        // consistent snapshot.
        let product_ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM products WHERE category_id = $1")
                .bind(id.as_uuid())
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to collect products: {}", e),
                    )
                })?;

        let sub_category_ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM sub_categories WHERE category_id = $1")
                .bind(id.as_uuid())
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to collect sub-categories: {}", e),
                    )
                })?;

        sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(&product_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete products: {}", e))
            })?;

        sqlx::query("DELETE FROM sub_categories WHERE id = ANY($1)")
            .bind(&sub_category_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete sub-categories: {}", e),
                )
            })?;

        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete category: {}", e))
            })?;

        if deleted.rows_affected() == 0 {
            // Rolls back the descendant deletes on drop.
            return Err(DomainError::new(
                ErrorCode::CategoryNotFound,
                "Category not found",
            ));
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit cascade: {}", e))
        })?;

        tracing::debug!(
            category_id = %id,
            sub_categories = sub_category_ids.len(),
            products = product_ids.len(),
            "cascade delete committed"
        );

        Ok(CascadeSummary {
            sub_categories_deleted: sub_category_ids.len() as u64,
            products_deleted: product_ids.len() as u64,
        })
    }
}
