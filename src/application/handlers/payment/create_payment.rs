//! CreatePaymentHandler - opens a settlement attempt against an order.
//!
//! Payments must match the order total exactly; partial payments are not a
//! thing in this core. The processor intent is opened first, then the
//! pending payment is recorded with the processor's reference, and the
//! caller receives the client-side continuation token for the handshake.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::foundation::{AuthContext, Currency, Money, OrderId, PaymentId};
use crate::domain::order::OrderStatus;
use crate::domain::payment::{Payment, PaymentError};
use crate::ports::{CreateIntentRequest, OrderRepository, PaymentProcessor, PaymentRepository};

/// Command to create a payment for an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub auth: AuthContext,
    pub order_id: OrderId,
    pub amount_cents: i64,
    pub currency: Currency,
}

/// The recorded payment plus the processor handshake token.
#[derive(Debug, Clone)]
pub struct CreatedPayment {
    pub payment: Payment,
    pub client_secret: String,
}

/// Handler for payment creation.
pub struct CreatePaymentHandler {
    orders: Arc<dyn OrderRepository>,
    payments: Arc<dyn PaymentRepository>,
    processor: Arc<dyn PaymentProcessor>,
}

impl CreatePaymentHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        payments: Arc<dyn PaymentRepository>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            orders,
            payments,
            processor,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentCommand,
    ) -> Result<MutationResult<CreatedPayment>, PaymentError> {
        let user = cmd.auth.require()?;

        // An order belonging to someone else is indistinguishable from a
        // missing one.
        let order = self
            .orders
            .find_by_id(cmd.order_id)
            .await
            .map_err(|e| PaymentError::infrastructure(e.to_string()))?
            .filter(|order| order.is_owned_by(&user.id))
            .ok_or_else(|| PaymentError::order_not_found(cmd.order_id))?;

        if order.status != OrderStatus::Created {
            return Err(PaymentError::validation(
                "order",
                format!("order in status '{}' cannot take a payment", order.status.as_str()),
            ));
        }

        let amount = Money::from_cents(cmd.amount_cents, cmd.currency);
        let total = order.total();
        if amount != total {
            return Err(PaymentError::amount_mismatch(total, amount));
        }

        let payment_id = PaymentId::new();
        let intent = self
            .processor
            .create_intent(CreateIntentRequest {
                order_id: order.id,
                user_id: user.id.clone(),
                amount,
                idempotency_key: format!("payment-{}", payment_id),
            })
            .await
            .map_err(|e| PaymentError::provider_error(e.message))?;

        let payment = Payment::new(payment_id, order.id, user.id.clone(), amount, intent.reference);
        self.payments.save(&payment).await?;

        Ok(MutationResult::ok(CreatedPayment {
            payment,
            client_secret: intent.client_secret,
        }))
    }
}
