//! AdvanceOrderStatusHandler - moves an order through its lifecycle.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::foundation::{AuthContext, OrderId};
use crate::domain::order::{Order, OrderError, OrderStatus};
use crate::ports::OrderRepository;

/// Command to advance an order's status.
#[derive(Debug, Clone)]
pub struct AdvanceOrderStatusCommand {
    pub auth: AuthContext,
    pub order_id: OrderId,
    pub new_status: OrderStatus,
}

/// Handler for order status changes.
///
/// Transitions follow the forward-only state graph; a transition to the
/// current status succeeds as an idempotent no-op.
pub struct AdvanceOrderStatusHandler {
    orders: Arc<dyn OrderRepository>,
}

impl AdvanceOrderStatusHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(
        &self,
        cmd: AdvanceOrderStatusCommand,
    ) -> Result<MutationResult<Order>, OrderError> {
        cmd.auth.require()?;

        let mut order = self
            .orders
            .find_by_id(cmd.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(cmd.order_id))?;

        let from = order.status;
        order
            .advance_status(cmd.new_status)
            .map_err(|_| OrderError::invalid_transition(from, cmd.new_status))?;

        if order.status != from {
            self.orders.update_status(&order).await?;
        }

        Ok(MutationResult::ok(order))
    }
}
