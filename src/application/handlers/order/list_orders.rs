//! ListOrdersHandler - cursor-paginated order history.

use std::sync::Arc;

use crate::domain::foundation::{AuthContext, Cursor, Page, PageRequest};
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

/// Query for the caller's order history.
#[derive(Debug, Clone, Default)]
pub struct ListOrdersQuery {
    pub auth: AuthContext,
    pub page: PageRequest,
}

/// Handler for the order listing query.
///
/// Orders come back `created_at` descending with id tie-break; the cursor
/// encodes both, so the page stays stable while new orders are inserted.
pub struct ListOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl ListOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self, query: ListOrdersQuery) -> Result<Page<Order>, OrderError> {
        let user = query.auth.require()?;
        let limit = query.page.limit();
        let cursor = query.page.cursor()?;

        // Overfetch by one to detect the next page.
        let fetched = self
            .orders
            .list_by_user(&user.id, limit + 1, cursor)
            .await?;

        Ok(Page::from_overfetch(fetched, limit, |order| {
            Cursor::new(order.created_at, *order.id.as_uuid())
        }))
    }
}
