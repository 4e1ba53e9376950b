//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::domain::catalog::{Product, ProductFilter, ProductImage, LOW_STOCK_THRESHOLD};
use crate::domain::foundation::{
    CategoryId, Currency, DomainError, ErrorCode, Money, ProductId, ProductImageId, SubCategoryId,
    Timestamp,
};
use crate::ports::ProductRepository;

/// PostgreSQL implementation of the ProductRepository port.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_images(&self, product_ids: &[Uuid]) -> Result<Vec<ImageRow>, DomainError> {
        sqlx::query_as(
            r#"
            SELECT id, product_id, url
            FROM product_images
            WHERE product_id = ANY($1)
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to load images: {}", e))
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    amount_in_stock: i32,
    category_id: Uuid,
    sub_category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    product_id: Uuid,
    url: String,
}

pub(crate) fn parse_currency(s: &str) -> Result<Currency, DomainError> {
    Currency::parse(s).map_err(|_| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid currency value: {}", s))
    })
}

fn hydrate(row: ProductRow, images: Vec<ImageRow>) -> Result<Product, DomainError> {
    let currency = parse_currency(&row.currency)?;
    Ok(Product {
        id: ProductId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        price: Money::from_cents(row.price_cents, currency),
        amount_in_stock: row.amount_in_stock.max(0) as u32,
        category_id: CategoryId::from_uuid(row.category_id),
        sub_category_id: row.sub_category_id.map(SubCategoryId::from_uuid),
        images: images
            .into_iter()
            .map(|image| ProductImage {
                id: ProductImageId::from_uuid(image.id),
                product_id: ProductId::from_uuid(image.product_id),
                url: image.url,
            })
            .collect(),
        created_at: Timestamp::from_datetime(row.created_at),
        updated_at: Timestamp::from_datetime(row.updated_at),
    })
}

const SELECT_PRODUCT: &str = r#"
    SELECT id, name, description, price_cents, currency, amount_in_stock,
           category_id, sub_category_id, created_at, updated_at
    FROM products
"#;

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to begin transaction: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, currency, amount_in_stock,
                category_id, sub_category_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents)
        .bind(product.price.currency.code())
        .bind(product.amount_in_stock as i32)
        .bind(product.category_id.as_uuid())
        .bind(product.sub_category_id.as_ref().map(|id| *id.as_uuid()))
        .bind(product.created_at.as_datetime())
        .bind(product.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save product: {}", e))
        })?;

        for image in &product.images {
            sqlx::query("INSERT INTO product_images (id, product_id, url) VALUES ($1, $2, $3)")
                .bind(image.id.as_uuid())
                .bind(image.product_id.as_uuid())
                .bind(&image.url)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to save image: {}", e))
                })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to commit save: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                price_cents = $4,
                currency = $5,
                amount_in_stock = $6,
                category_id = $7,
                sub_category_id = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents)
        .bind(product.price.currency.code())
        .bind(product.amount_in_stock as i32)
        .bind(product.category_id.as_uuid())
        .bind(product.sub_category_id.as_ref().map(|id| *id.as_uuid()))
        .bind(product.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to update product: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PRODUCT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find product: {}", e),
                    )
                })?;

        match row {
            None => Ok(None),
            Some(row) => {
                let images = self.load_images(&[row.id]).await?;
                Ok(Some(hydrate(row, images)?))
            }
        }
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{} WHERE id = ANY($1)", SELECT_PRODUCT))
                .bind(&uuids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find products: {}", e),
                    )
                })?;

        let images = self.load_images(&uuids).await?;
        rows.into_iter()
            .map(|row| {
                let product_images: Vec<ImageRow> = images
                    .iter()
                    .filter(|image| image.product_id == row.id)
                    .map(|image| ImageRow {
                        id: image.id,
                        product_id: image.product_id,
                        url: image.url.clone(),
                    })
                    .collect();
                hydrate(row, product_images)
            })
            .collect()
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "{} WHERE TRUE",
            SELECT_PRODUCT
        ));

        if let Some(needle) = &filter.name_contains {
            builder.push(" AND name ILIKE ");
            builder.push_bind(format!("%{}%", needle));
        }
        if let Some(category_id) = filter.category_id {
            builder.push(" AND category_id = ");
            builder.push_bind(*category_id.as_uuid());
        }
        if let Some(sub_category_id) = filter.sub_category_id {
            builder.push(" AND sub_category_id = ");
            builder.push_bind(*sub_category_id.as_uuid());
        }
        if let Some(min) = filter.min_price_cents {
            builder.push(" AND price_cents >= ");
            builder.push_bind(min);
        }
        if let Some(max) = filter.max_price_cents {
            builder.push(" AND price_cents <= ");
            builder.push_bind(max);
        }
        if filter.low_stock {
            builder.push(" AND amount_in_stock < ");
            builder.push_bind(LOW_STOCK_THRESHOLD as i32);
        }
        builder.push(" ORDER BY name ASC");

        let rows: Vec<ProductRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to list products: {}", e))
            })?;

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let images = self.load_images(&uuids).await?;
        rows.into_iter()
            .map(|row| {
                let product_images: Vec<ImageRow> = images
                    .iter()
                    .filter(|image| image.product_id == row.id)
                    .map(|image| ImageRow {
                        id: image.id,
                        product_id: image.product_id,
                        url: image.url.clone(),
                    })
                    .collect();
                hydrate(row, product_images)
            })
            .collect()
    }

    async fn delete(&self, id: ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete product: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProductNotFound,
                "Product not found",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_currency_accepts_known_codes() {
        assert_eq!(parse_currency("usd").unwrap(), Currency::Usd);
        assert_eq!(parse_currency("EUR").unwrap(), Currency::Eur);
    }

    #[test]
    fn parse_currency_rejects_unknown_codes() {
        assert!(parse_currency("doubloons").is_err());
        assert!(parse_currency("").is_err());
    }
}
