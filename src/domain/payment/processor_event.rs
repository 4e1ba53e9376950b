//! Payment processor callback events.
//!
//! The external processor confirms settlement asynchronously. The callback
//! payload is parsed into a `ProcessorEvent` after signature verification.

use serde::Deserialize;

/// Settlement outcome reported by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Failed,
}

/// A verified callback event from the payment processor.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorEvent {
    /// Processor-assigned event id.
    pub id: String,

    /// Event type, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the processor created the event.
    pub created: i64,

    pub data: ProcessorEventData,

    /// True for live-mode events, false for test traffic.
    #[serde(default)]
    pub livemode: bool,
}

/// Payload of a processor event.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorEventData {
    /// The payment intent reference this event settles.
    pub reference: String,
}

impl ProcessorEvent {
    /// Maps the event type onto a settlement outcome.
    ///
    /// Returns `None` for event types this core does not consume.
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self.event_type.as_str() {
            "payment_intent.succeeded" => Some(PaymentOutcome::Succeeded),
            "payment_intent.payment_failed" => Some(PaymentOutcome::Failed),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.livemode
    }
}
