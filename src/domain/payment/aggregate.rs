//! Payment aggregate entity.
//!
//! One row per settlement attempt. An order accumulates payments: a failed
//! attempt stays on the ledger and a retry creates a new row.
//!
//! # Design Decisions
//!
//! - **Money in cents**: amounts are i64 minor units, never floats
//! - **Opaque processor reference**: the external processor's intent id is
//!   stored verbatim and unique, used to correlate webhook confirmations
//! - **Forward-only status**: transitions go through the state machine

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Money, OrderId, PaymentId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::PaymentStatus;

/// A single attempt to settle an order's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Money,
    pub status: PaymentStatus,
    /// Opaque reference issued by the external processor.
    pub processor_reference: String,
    pub created_at: Timestamp,
}

impl Payment {
    /// Creates a new pending payment attempt.
    pub fn new(
        id: PaymentId,
        order_id: OrderId,
        user_id: UserId,
        amount: Money,
        processor_reference: impl Into<String>,
    ) -> Self {
        Self {
            id,
            order_id,
            user_id,
            amount,
            status: PaymentStatus::Pending,
            processor_reference: processor_reference.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Marks the payment settled successfully.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment has already settled.
    pub fn mark_successful(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(PaymentStatus::Successful)?;
        Ok(())
    }

    /// Marks the payment failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment has already settled.
    pub fn mark_failed(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(PaymentStatus::Failed)?;
        Ok(())
    }

    /// Returns true once the processor has confirmed an outcome.
    pub fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }
}
