//! ListPaymentsHandler - cursor-paginated payment history.

use std::sync::Arc;

use crate::domain::foundation::{AuthContext, Cursor, Page, PageRequest};
use crate::domain::payment::{Payment, PaymentError};
use crate::ports::PaymentRepository;

/// Query for the caller's payment history.
#[derive(Debug, Clone, Default)]
pub struct ListPaymentsQuery {
    pub auth: AuthContext,
    pub page: PageRequest,
}

/// Handler for the payment listing query. Paginated identically to orders.
pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, query: ListPaymentsQuery) -> Result<Page<Payment>, PaymentError> {
        let user = query.auth.require()?;
        let limit = query.page.limit();
        let cursor = query.page.cursor()?;

        let fetched = self
            .payments
            .list_by_user(&user.id, limit + 1, cursor)
            .await?;

        Ok(Page::from_overfetch(fetched, limit, |payment| {
            Cursor::new(payment.created_at, *payment.id.as_uuid())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::foundation::{
        AuthenticatedUser, Currency, Money, OrderId, PaymentId, UserId,
    };

    fn auth() -> AuthContext {
        AuthContext::authenticated(AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "alice@example.com",
        ))
    }

    async fn seed_payments(store: &MemoryStore, count: usize) {
        for i in 0..count {
            let payment = Payment::new(
                PaymentId::new(),
                OrderId::new(),
                UserId::new("user-123").unwrap(),
                Money::from_cents(999, Currency::Usd),
                format!("pi_{}", i),
            );
            PaymentRepository::save(store, &payment).await.unwrap();
        }
    }

    #[tokio::test]
    async fn pages_walk_history_without_overlap() {
        let store = Arc::new(MemoryStore::new());
        seed_payments(&store, 4).await;
        let handler = ListPaymentsHandler::new(store.clone());

        let first = handler
            .handle(ListPaymentsQuery {
                auth: auth(),
                page: PageRequest {
                    first: Some(3),
                    after: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(first.items.len(), 3);
        assert!(first.page_info.has_next_page);

        let second = handler
            .handle(ListPaymentsQuery {
                auth: auth(),
                page: PageRequest {
                    first: Some(3),
                    after: first.page_info.end_cursor.clone(),
                },
            })
            .await
            .unwrap();

        assert_eq!(second.items.len(), 1);
        assert!(!second.page_info.has_next_page);
    }

    #[tokio::test]
    async fn other_users_payments_are_invisible() {
        let store = Arc::new(MemoryStore::new());
        let foreign = Payment::new(
            PaymentId::new(),
            OrderId::new(),
            UserId::new("someone-else").unwrap(),
            Money::from_cents(100, Currency::Usd),
            "pi_foreign",
        );
        PaymentRepository::save(store.as_ref(), &foreign)
            .await
            .unwrap();
        let handler = ListPaymentsHandler::new(store);

        let page = handler
            .handle(ListPaymentsQuery {
                auth: auth(),
                page: PageRequest::default(),
            })
            .await
            .unwrap();

        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn fails_without_identity() {
        let store = Arc::new(MemoryStore::new());
        let handler = ListPaymentsHandler::new(store);

        let result = handler.handle(ListPaymentsQuery::default()).await;

        assert!(matches!(result, Err(PaymentError::AuthRequired)));
    }
}
