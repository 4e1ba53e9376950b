//! Integration tests for the checkout and settlement flow.
//!
//! Exercises the full path end to end against the in-memory adapter:
//! catalog seeding, cart mutation, checkout, payment creation, processor
//! confirmation, and order status advancement.

use std::sync::Arc;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use storefront::adapters::MemoryStore;
use storefront::application::handlers::cart::{AddCartItemCommand, AddCartItemHandler};
use storefront::application::handlers::catalog::{
    CreateCategoryCommand, CreateCategoryHandler, CreateProductCommand, CreateProductHandler,
};
use storefront::application::handlers::order::{
    AdvanceOrderStatusCommand, AdvanceOrderStatusHandler, CheckoutCommand, CheckoutHandler,
    ListOrdersHandler, ListOrdersQuery,
};
use storefront::application::handlers::payment::{
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, CreatePaymentCommand,
    CreatePaymentHandler,
};
use storefront::domain::foundation::{
    AuthContext, AuthenticatedUser, Currency, DomainError, PageRequest, ProductId, UserId,
};
use storefront::domain::order::{OrderError, OrderStatus};
use storefront::domain::payment::{PaymentStatus, ProcessorWebhookVerifier};
use storefront::ports::{
    CreateIntentRequest, PaymentIntent, PaymentProcessor, PaymentRepository, ProductRepository,
};

const WEBHOOK_SECRET: &str = "whsec_integration_test";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Processor stub that hands out deterministic intents.
struct StubProcessor;

#[async_trait]
impl PaymentProcessor for StubProcessor {
    async fn create_intent(
        &self,
        request: CreateIntentRequest,
    ) -> Result<PaymentIntent, DomainError> {
        Ok(PaymentIntent {
            reference: format!("pi_{}", request.order_id),
            client_secret: format!("pi_{}_secret", request.order_id),
        })
    }
}

fn auth_for(user: &str) -> AuthContext {
    AuthContext::authenticated(AuthenticatedUser::new(
        UserId::new(user).unwrap(),
        format!("{}@example.com", user),
    ))
}

fn signed_webhook(event_type: &str, reference: &str) -> ConfirmPaymentCommand {
    let payload = serde_json::json!({
        "id": "evt_integration",
        "type": event_type,
        "created": chrono::Utc::now().timestamp(),
        "data": { "reference": reference },
        "livemode": false
    })
    .to_string();

    let timestamp = chrono::Utc::now().timestamp();
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes())
        .expect("HMAC accepts any key");
    mac.update(signed_payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    ConfirmPaymentCommand {
        payload: payload.into_bytes(),
        signature_header: format!("t={},v1={}", timestamp, signature),
    }
}

/// Seeds a category and a product, returning the product id.
async fn seed_catalog(store: &Arc<MemoryStore>, price_cents: i64, stock: u32) -> ProductId {
    let category = CreateCategoryHandler::new(store.clone())
        .handle(CreateCategoryCommand {
            name: "Electronics".to_string(),
        })
        .await
        .unwrap()
        .entity
        .unwrap();

    CreateProductHandler::new(store.clone(), store.clone(), store.clone())
        .handle(CreateProductCommand {
            name: "Widget".to_string(),
            description: None,
            price_cents,
            currency: Currency::Usd,
            amount_in_stock: stock,
            category_id: category.id,
            sub_category_id: None,
        })
        .await
        .unwrap()
        .entity
        .unwrap()
        .id
}

// =============================================================================
// Full Flow
// =============================================================================

#[tokio::test]
async fn cart_to_delivered_order_via_payment() {
    let store = Arc::new(MemoryStore::new());
    let product_id = seed_catalog(&store, 999, 10).await;

    // Add two units to the cart.
    AddCartItemHandler::new(store.clone(), store.clone())
        .handle(AddCartItemCommand {
            auth: auth_for("alice"),
            product_id,
            quantity: 2,
        })
        .await
        .unwrap();

    // Checkout freezes the order at 2 x 9.99.
    let order = CheckoutHandler::new(store.clone(), store.clone(), store.clone())
        .handle(CheckoutCommand {
            auth: auth_for("alice"),
        })
        .await
        .unwrap()
        .entity
        .unwrap();
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.total().cents, 1998);

    // Stock was decremented and the cart drained.
    let product = ProductRepository::find_by_id(store.as_ref(), product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.amount_in_stock, 8);
    assert_eq!(store.cart_item_count().await, 0);

    // Pay the exact total.
    let created = CreatePaymentHandler::new(store.clone(), store.clone(), Arc::new(StubProcessor))
        .handle(CreatePaymentCommand {
            auth: auth_for("alice"),
            order_id: order.id,
            amount_cents: 1998,
            currency: Currency::Usd,
        })
        .await
        .unwrap()
        .entity
        .unwrap();
    assert_eq!(created.payment.status, PaymentStatus::Pending);
    assert!(!created.client_secret.is_empty());

    // The processor confirms; the order advances to pending.
    let confirm = ConfirmPaymentHandler::new(
        ProcessorWebhookVerifier::new(WEBHOOK_SECRET),
        store.clone(),
        store.clone(),
    );
    let result = confirm
        .handle(signed_webhook(
            "payment_intent.succeeded",
            &created.payment.processor_reference,
        ))
        .await
        .unwrap();
    match result {
        ConfirmPaymentResult::Settled(payment) => {
            assert_eq!(payment.status, PaymentStatus::Successful)
        }
        ConfirmPaymentResult::Ignored => panic!("expected settlement"),
    }

    // Deliver it.
    let delivered = AdvanceOrderStatusHandler::new(store.clone())
        .handle(AdvanceOrderStatusCommand {
            auth: auth_for("staff"),
            order_id: order.id,
            new_status: OrderStatus::Delivered,
        })
        .await
        .unwrap()
        .entity
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // The order shows up in alice's history, newest first.
    let page = ListOrdersHandler::new(store.clone())
        .handle(ListOrdersQuery {
            auth: auth_for("alice"),
            page: PageRequest::default(),
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, order.id);
}

#[tokio::test]
async fn failed_payment_leaves_order_open_for_retry() {
    let store = Arc::new(MemoryStore::new());
    let product_id = seed_catalog(&store, 500, 5).await;

    AddCartItemHandler::new(store.clone(), store.clone())
        .handle(AddCartItemCommand {
            auth: auth_for("alice"),
            product_id,
            quantity: 1,
        })
        .await
        .unwrap();
    let order = CheckoutHandler::new(store.clone(), store.clone(), store.clone())
        .handle(CheckoutCommand {
            auth: auth_for("alice"),
        })
        .await
        .unwrap()
        .entity
        .unwrap();

    let payments = CreatePaymentHandler::new(store.clone(), store.clone(), Arc::new(StubProcessor));
    let first = payments
        .handle(CreatePaymentCommand {
            auth: auth_for("alice"),
            order_id: order.id,
            amount_cents: 500,
            currency: Currency::Usd,
        })
        .await
        .unwrap()
        .entity
        .unwrap();

    let confirm = ConfirmPaymentHandler::new(
        ProcessorWebhookVerifier::new(WEBHOOK_SECRET),
        store.clone(),
        store.clone(),
    );
    confirm
        .handle(signed_webhook(
            "payment_intent.payment_failed",
            &first.payment.processor_reference,
        ))
        .await
        .unwrap();

    // Order untouched; the ledger keeps the failed attempt.
    let stored = storefront::ports::OrderRepository::find_by_id(store.as_ref(), order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Created);

    // A retry intent can be created against the same order. The stub hands
    // out the same reference per order, so retry with a distinct one.
    let retry = storefront::domain::payment::Payment::new(
        storefront::domain::foundation::PaymentId::new(),
        order.id,
        UserId::new("alice").unwrap(),
        storefront::domain::foundation::Money::from_cents(500, Currency::Usd),
        "pi_retry_attempt",
    );
    PaymentRepository::save(store.as_ref(), &retry).await.unwrap();

    let ledger = store.list_by_order(order.id).await.unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(
        ledger.iter().filter(|p| p.status == PaymentStatus::Failed).count(),
        1
    );
    assert_eq!(
        ledger.iter().filter(|p| p.status == PaymentStatus::Pending).count(),
        1
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_checkouts_never_oversell_the_last_unit() {
    let store = Arc::new(MemoryStore::new());
    let product_id = seed_catalog(&store, 999, 1).await;

    let users = ["alice", "bob", "carol", "dave"];
    for user in users {
        AddCartItemHandler::new(store.clone(), store.clone())
            .handle(AddCartItemCommand {
                auth: auth_for(user),
                product_id,
                quantity: 1,
            })
            .await
            .unwrap();
    }

    let mut tasks = Vec::new();
    for user in users {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            CheckoutHandler::new(store.clone(), store.clone(), store)
                .handle(CheckoutCommand {
                    auth: auth_for(user),
                })
                .await
        }));
    }

    let mut successes = 0;
    let mut out_of_stock = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => successes += 1,
            Err(OrderError::OutOfStock { .. }) => out_of_stock += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(successes, 1, "exactly one checkout may win");
    assert_eq!(out_of_stock, users.len() - 1);

    let product = ProductRepository::find_by_id(store.as_ref(), product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.amount_in_stock, 0, "stock ends at zero, not negative");
}

#[tokio::test]
async fn payment_amount_must_match_order_total() {
    let store = Arc::new(MemoryStore::new());
    let product_id = seed_catalog(&store, 999, 5).await;

    AddCartItemHandler::new(store.clone(), store.clone())
        .handle(AddCartItemCommand {
            auth: auth_for("alice"),
            product_id,
            quantity: 1,
        })
        .await
        .unwrap();
    let order = CheckoutHandler::new(store.clone(), store.clone(), store.clone())
        .handle(CheckoutCommand {
            auth: auth_for("alice"),
        })
        .await
        .unwrap()
        .entity
        .unwrap();

    let payments = CreatePaymentHandler::new(store.clone(), store.clone(), Arc::new(StubProcessor));

    let mismatched = payments
        .handle(CreatePaymentCommand {
            auth: auth_for("alice"),
            order_id: order.id,
            amount_cents: 998,
            currency: Currency::Usd,
        })
        .await;
    assert!(mismatched.is_err());

    let matched = payments
        .handle(CreatePaymentCommand {
            auth: auth_for("alice"),
            order_id: order.id,
            amount_cents: 999,
            currency: Currency::Usd,
        })
        .await;
    assert!(matched.is_ok());

    // Order status is untouched until the processor confirms.
    let stored = storefront::ports::OrderRepository::find_by_id(store.as_ref(), order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, OrderStatus::Created);
}
