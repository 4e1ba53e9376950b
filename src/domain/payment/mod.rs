//! Payment ledger - settlement attempts against orders.

mod aggregate;
mod errors;
mod processor_event;
mod status;
mod webhook_errors;
mod webhook_verifier;

pub use aggregate::Payment;
pub use errors::PaymentError;
pub use processor_event::{PaymentOutcome, ProcessorEvent};
pub use status::PaymentStatus;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{ProcessorWebhookVerifier, SignatureHeader};

#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
