//! ConfirmPaymentHandler - processes the processor's settlement callback.
//!
//! The callback is the external collaborator's entry point: its payload is
//! authenticated with an HMAC signature before anything else happens. A
//! successful settlement moves the payment to `Successful` and its order
//! from `Created` to `Pending`; a failure settles the payment as `Failed`
//! and leaves the order untouched so a retry payment can follow.

use std::sync::Arc;

use crate::domain::foundation::StateMachine;
use crate::domain::order::OrderStatus;
use crate::domain::payment::{
    Payment, PaymentError, PaymentOutcome, ProcessorWebhookVerifier,
};
use crate::ports::{OrderRepository, PaymentRepository};

/// Raw processor callback, as delivered by the transport layer.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub payload: Vec<u8>,
    pub signature_header: String,
}

/// Outcome of processing a callback.
#[derive(Debug, Clone)]
pub enum ConfirmPaymentResult {
    /// The referenced payment settled.
    Settled(Payment),
    /// The event type is not one this core consumes.
    Ignored,
}

/// Handler for processor settlement callbacks.
pub struct ConfirmPaymentHandler {
    verifier: ProcessorWebhookVerifier,
    payments: Arc<dyn PaymentRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        verifier: ProcessorWebhookVerifier,
        payments: Arc<dyn PaymentRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            verifier,
            payments,
            orders,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmPaymentCommand,
    ) -> Result<ConfirmPaymentResult, PaymentError> {
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature_header)?;

        let outcome = match event.outcome() {
            Some(outcome) => outcome,
            None => {
                tracing::debug!(event_type = %event.event_type, "ignoring processor event");
                return Ok(ConfirmPaymentResult::Ignored);
            }
        };

        let mut payment = self
            .payments
            .find_by_reference(&event.data.reference)
            .await?
            .ok_or_else(|| PaymentError::reference_not_found(event.data.reference.clone()))?;

        if payment.is_settled() {
            return Err(PaymentError::already_settled(payment.id));
        }

        match outcome {
            PaymentOutcome::Succeeded => {
                payment.mark_successful()?;
                self.payments.update(&payment).await?;

                let mut order = self
                    .orders
                    .find_by_id(payment.order_id)
                    .await
                    .map_err(|e| PaymentError::infrastructure(e.to_string()))?
                    .ok_or_else(|| PaymentError::order_not_found(payment.order_id))?;
                order.status = order
                    .status
                    .transition_to(OrderStatus::Pending)
                    .map_err(|e| PaymentError::infrastructure(e.to_string()))?;
                self.orders
                    .update_status(&order)
                    .await
                    .map_err(|e| PaymentError::infrastructure(e.to_string()))?;

                tracing::info!(
                    payment_id = %payment.id,
                    order_id = %order.id,
                    "payment settled, order advanced to pending"
                );
            }
            PaymentOutcome::Failed => {
                payment.mark_failed()?;
                self.payments.update(&payment).await?;
                tracing::warn!(payment_id = %payment.id, "payment failed at processor");
            }
        }

        Ok(ConfirmPaymentResult::Settled(payment))
    }
}
