//! Order status state machine.
//!
//! Forward-only: Created -> Pending -> Delivered, with Cancelled reachable
//! from Created and Pending. Delivered and Cancelled are terminal.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, payment not yet confirmed.
    #[default]
    Created,
    /// Payment confirmed, awaiting delivery.
    Pending,
    /// Order delivered.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created" => Some(OrderStatus::Created),
            "pending" => Some(OrderStatus::Pending),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Created, Pending) | (Pending, Delivered) | (Created, Cancelled) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Created => vec![Pending, Cancelled],
            Pending => vec![Delivered, Cancelled],
            Delivered => vec![],
            Cancelled => vec![],
        }
    }
}
