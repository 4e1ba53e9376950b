//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Comment, Rating};
use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, ProductId, RatingId, Timestamp, UserId,
};
use crate::ports::ReviewRepository;

/// PostgreSQL implementation of the ReviewRepository port.
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    product_id: Uuid,
    user_id: String,
    stars: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RatingRow> for Rating {
    type Error = DomainError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Rating {
            id: RatingId::from_uuid(row.id),
            product_id: ProductId::from_uuid(row.product_id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            stars: row.stars.clamp(1, 5) as u8,
            comment: row.comment,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    product_id: Uuid,
    user_id: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::from_uuid(row.id),
            product_id: ProductId::from_uuid(row.product_id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            body: row.body,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn save_rating(&self, rating: &Rating) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ratings (id, product_id, user_id, stars, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(rating.id.as_uuid())
        .bind(rating.product_id.as_uuid())
        .bind(rating.user_id.as_str())
        .bind(rating.stars as i16)
        .bind(&rating.comment)
        .bind(rating.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save rating: {}", e))
        })?;

        Ok(())
    }

    async fn save_comment(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, product_id, user_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id.as_uuid())
        .bind(comment.product_id.as_uuid())
        .bind(comment.user_id.as_str())
        .bind(&comment.body)
        .bind(comment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save comment: {}", e))
        })?;

        Ok(())
    }

    async fn list_ratings(&self, product_id: ProductId) -> Result<Vec<Rating>, DomainError> {
        let rows: Vec<RatingRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, user_id, stars, comment, created_at
            FROM ratings
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list ratings: {}", e))
        })?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn list_comments(&self, product_id: ProductId) -> Result<Vec<Comment>, DomainError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, user_id, body, created_at
            FROM comments
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list comments: {}", e))
        })?;

        rows.into_iter().map(Comment::try_from).collect()
    }
}
