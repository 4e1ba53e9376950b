//! Payment operation handlers.

mod confirm_payment;
mod create_payment;
mod list_payments;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler, CreatedPayment};
pub use list_payments::{ListPaymentsHandler, ListPaymentsQuery};
