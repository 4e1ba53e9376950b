//! PostgreSQL implementation of SubCategoryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::SubCategory;
use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, SubCategoryId, Timestamp};
use crate::ports::SubCategoryRepository;

/// PostgreSQL implementation of the SubCategoryRepository port.
pub struct PostgresSubCategoryRepository {
    pool: PgPool,
}

impl PostgresSubCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubCategoryRow {
    id: Uuid,
    name: String,
    category_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubCategoryRow> for SubCategory {
    fn from(row: SubCategoryRow) -> Self {
        SubCategory {
            id: SubCategoryId::from_uuid(row.id),
            name: row.name,
            category_id: CategoryId::from_uuid(row.category_id),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl SubCategoryRepository for PostgresSubCategoryRepository {
    async fn save(&self, sub_category: &SubCategory) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sub_categories (id, name, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(sub_category.id.as_uuid())
        .bind(&sub_category.name)
        .bind(sub_category.category_id.as_uuid())
        .bind(sub_category.created_at.as_datetime())
        .bind(sub_category.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save sub-category: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, sub_category: &SubCategory) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sub_categories SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(sub_category.id.as_uuid())
        .bind(&sub_category.name)
        .bind(sub_category.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update sub-category: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubCategoryNotFound,
                "Sub-category not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: SubCategoryId) -> Result<Option<SubCategory>, DomainError> {
        let row: Option<SubCategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, category_id, created_at, updated_at
            FROM sub_categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find sub-category: {}", e),
            )
        })?;

        Ok(row.map(SubCategory::from))
    }

    async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, DomainError> {
        let rows: Vec<SubCategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, category_id, created_at, updated_at
            FROM sub_categories
            WHERE category_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(category_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list sub-categories: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(SubCategory::from).collect())
    }

    async fn delete_detaching_products(&self, id: SubCategoryId) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        let detached = sqlx::query(
            r#"
            UPDATE products SET sub_category_id = NULL, updated_at = NOW()
            WHERE sub_category_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to detach products: {}", e))
        })?;

        let deleted = sqlx::query("DELETE FROM sub_categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete sub-category: {}", e),
                )
            })?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubCategoryNotFound,
                "Sub-category not found",
            ));
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit delete: {}", e))
        })?;

        Ok(detached.rows_affected())
    }
}
