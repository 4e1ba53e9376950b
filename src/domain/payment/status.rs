//! Payment status state machine.
//!
//! Pending -> Successful | Failed; both outcomes are terminal. A failed
//! payment is never resurrected; the caller creates a fresh attempt.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Settlement status of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting processor confirmation.
    #[default]
    Pending,
    /// Processor confirmed settlement.
    Successful,
    /// Processor rejected the attempt.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Successful => "successful",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "successful" => Some(PaymentStatus::Successful),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!((self, target), (Pending, Successful) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Successful, Failed],
            Successful => vec![],
            Failed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_settle_either_way() {
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Successful));
        assert!(PaymentStatus::Pending.can_transition_to(&PaymentStatus::Failed));
    }

    #[test]
    fn settled_states_are_terminal() {
        assert!(PaymentStatus::Successful.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(!PaymentStatus::Failed.can_transition_to(&PaymentStatus::Successful));
    }

    #[test]
    fn parse_roundtrips_all_statuses() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Successful,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::parse("processing"), None);
    }
}
