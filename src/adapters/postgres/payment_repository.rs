//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    Cursor, DomainError, ErrorCode, Money, OrderId, PaymentId, Timestamp, UserId,
};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::ports::PaymentRepository;

use super::product_repository::parse_currency;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    order_id: Uuid,
    user_id: String,
    amount_cents: i64,
    currency: String,
    status: String,
    processor_reference: String,
    created_at: DateTime<Utc>,
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    PaymentStatus::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid payment status: {}", s))
    })
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let currency = parse_currency(&row.currency)?;
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            order_id: OrderId::from_uuid(row.order_id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            amount: Money::from_cents(row.amount_cents, currency),
            status: parse_payment_status(&row.status)?,
            processor_reference: row.processor_reference,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_PAYMENT: &str = r#"
    SELECT id, order_id, user_id, amount_cents, currency, status,
           processor_reference, created_at
    FROM payments
"#;

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn save(&self, payment: &Payment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, order_id, user_id, amount_cents, currency, status,
                processor_reference, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.order_id.as_uuid())
        .bind(payment.user_id.as_str())
        .bind(payment.amount.cents)
        .bind(payment.amount.currency.code())
        .bind(payment.status.as_str())
        .bind(&payment.processor_reference)
        .bind(payment.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("payments_processor_reference_key") {
                    return DomainError::new(
                        ErrorCode::ValidationFailed,
                        "Processor reference already recorded",
                    );
                }
            }
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save payment: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, payment: &Payment) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE payments SET status = $2 WHERE id = $1")
            .bind(payment.id.as_uuid())
            .bind(payment.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to update payment: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PAYMENT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find payment: {}", e),
                    )
                })?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> =
            sqlx::query_as(&format!("{} WHERE processor_reference = $1", SELECT_PAYMENT))
                .bind(reference)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to find payment: {}", e),
                    )
                })?;

        row.map(Payment::try_from).transpose()
    }

    async fn list_by_order(&self, order_id: OrderId) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE order_id = $1 ORDER BY created_at ASC, id ASC",
            SELECT_PAYMENT
        ))
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list payments: {}", e))
        })?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: u32,
        cursor: Option<Cursor>,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = match cursor {
            None => sqlx::query_as(&format!(
                "{} WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
                SELECT_PAYMENT
            ))
            .bind(user_id.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await,
            Some(cursor) => sqlx::query_as(&format!(
                "{} WHERE user_id = $1 AND (created_at, id) < ($2, $3) \
                 ORDER BY created_at DESC, id DESC LIMIT $4",
                SELECT_PAYMENT
            ))
            .bind(user_id.as_str())
            .bind(cursor.created_at.as_datetime())
            .bind(cursor.id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list payments: {}", e))
        })?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}
