//! CheckoutHandler - converts the caller's cart into an immutable order.
//!
//! Checkout is all-or-nothing. Cart contents may be stale, so every item is
//! re-validated against live stock before anything is written; any
//! shortfall fails the whole operation naming the offending product. The
//! four effects - order insert, item snapshots, stock decrements, cart
//! drain - land in one `CheckoutStore` transaction, so a concurrent
//! checkout racing for the last unit loses with `OutOfStock` instead of
//! overselling.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::cart::reconcile;
use crate::domain::catalog::Product;
use crate::domain::foundation::{AuthContext, OrderId, ProductId};
use crate::domain::order::{Order, OrderError, OrderItem};
use crate::ports::{CartRepository, CheckoutCommitError, CheckoutStore, ProductRepository};

/// Command to check out the caller's cart.
#[derive(Debug, Clone)]
pub struct CheckoutCommand {
    pub auth: AuthContext,
}

/// Handler for checkout.
pub struct CheckoutHandler {
    carts: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
    checkout_store: Arc<dyn CheckoutStore>,
}

impl CheckoutHandler {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        products: Arc<dyn ProductRepository>,
        checkout_store: Arc<dyn CheckoutStore>,
    ) -> Self {
        Self {
            carts,
            products,
            checkout_store,
        }
    }

    pub async fn handle(&self, cmd: CheckoutCommand) -> Result<MutationResult<Order>, OrderError> {
        let user = cmd.auth.require()?;

        let cart = self
            .carts
            .find_by_user(&user.id)
            .await
            .map_err(|e| OrderError::infrastructure(e.to_string()))?
            .ok_or(OrderError::EmptyCart)?;

        let items = self
            .carts
            .list_items(cart.id)
            .await
            .map_err(|e| OrderError::infrastructure(e.to_string()))?;
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let product_ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<ProductId, Product> = self
            .products
            .find_by_ids(&product_ids)
            .await
            .map_err(|e| OrderError::infrastructure(e.to_string()))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let outcome = reconcile(&items, &products);

        if !outcome.dropped.is_empty() {
            self.carts
                .delete_items(&outcome.dropped)
                .await
                .map_err(|e| OrderError::infrastructure(e.to_string()))?;
        }
        if outcome.valid.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if let Some(shortfall) = outcome.short.first() {
            return Err(OrderError::out_of_stock(
                shortfall.product_id,
                shortfall.product_name.clone(),
                shortfall.requested,
                shortfall.available,
            ));
        }

        let order_id = OrderId::new();
        let order_items: Vec<OrderItem> = outcome
            .valid
            .iter()
            .map(|item| {
                let product = products
                    .get(&item.product_id)
                    .expect("reconciled items have products");
                OrderItem::freeze(order_id, item, product)
            })
            .collect();
        let order = Order::new(order_id, user.id.clone(), order_items);

        let drained: Vec<_> = outcome.valid.iter().map(|item| item.id).collect();
        match self.checkout_store.commit_checkout(&order, &drained).await {
            Ok(()) => {
                tracing::info!(
                    order_id = %order.id,
                    user_id = %order.user_id,
                    items = order.items.len(),
                    total_cents = order.total().cents,
                    "checkout committed"
                );
                Ok(MutationResult::ok(order))
            }
            Err(CheckoutCommitError::StockConflict {
                product_id,
                product_name,
                requested,
                available,
            }) => Err(OrderError::out_of_stock(
                product_id,
                product_name,
                requested,
                available,
            )),
            Err(CheckoutCommitError::Storage(err)) => {
                Err(OrderError::infrastructure(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::cart::CartItem;
    use crate::domain::foundation::{
        AuthenticatedUser, CartItemId, CategoryId, Currency, Money, UserId,
    };
    use crate::domain::order::OrderStatus;
    use crate::ports::OrderRepository;

    fn auth() -> AuthContext {
        AuthContext::authenticated(AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "alice@example.com",
        ))
    }

    fn handler(store: &Arc<MemoryStore>) -> CheckoutHandler {
        CheckoutHandler::new(store.clone(), store.clone(), store.clone())
    }

    async fn seed_product(store: &MemoryStore, name: &str, cents: i64, stock: u32) -> Product {
        let product = Product::new(
            ProductId::new(),
            name,
            None,
            Money::from_cents(cents, Currency::Usd),
            stock,
            CategoryId::new(),
            None,
        )
        .unwrap();
        ProductRepository::save(store, &product).await.unwrap();
        product
    }

    async fn seed_item(store: &MemoryStore, product_id: ProductId, quantity: u32) -> CartItem {
        let cart = store
            .find_or_create(&UserId::new("user-123").unwrap())
            .await
            .unwrap();
        let item = CartItem::new(CartItemId::new(), cart.id, product_id, quantity).unwrap();
        store.save_item(&item).await.unwrap();
        item
    }

    #[tokio::test]
    async fn creates_order_decrements_stock_and_drains_cart() {
        let store = Arc::new(MemoryStore::new());
        let product = seed_product(&store, "Widget", 999, 5).await;
        seed_item(&store, product.id, 2).await;

        let result = handler(&store)
            .handle(CheckoutCommand { auth: auth() })
            .await
            .unwrap();

        let order = result.entity.unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total().cents, 1998);

        let stored = ProductRepository::find_by_id(store.as_ref(), product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.amount_in_stock, 3);
        assert_eq!(store.cart_item_count().await, 0);
        assert!(OrderRepository::find_by_id(store.as_ref(), order.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn freezes_price_at_checkout_time() {
        let store = Arc::new(MemoryStore::new());
        let mut product = seed_product(&store, "Widget", 999, 5).await;
        seed_item(&store, product.id, 1).await;

        let order = handler(&store)
            .handle(CheckoutCommand { auth: auth() })
            .await
            .unwrap()
            .entity
            .unwrap();

        product.set_price(Money::from_cents(1999, Currency::Usd)).unwrap();
        ProductRepository::update(store.as_ref(), &product)
            .await
            .unwrap();

        let stored = OrderRepository::find_by_id(store.as_ref(), order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.items[0].unit_price.cents, 999);
    }

    #[tokio::test]
    async fn empty_cart_fails() {
        let store = Arc::new(MemoryStore::new());

        let result = handler(&store).handle(CheckoutCommand { auth: auth() }).await;

        assert!(matches!(result, Err(OrderError::EmptyCart)));
    }

    #[tokio::test]
    async fn cart_holding_only_deleted_products_fails_as_empty() {
        let store = Arc::new(MemoryStore::new());
        let product = seed_product(&store, "Doomed", 999, 5).await;
        seed_item(&store, product.id, 1).await;
        ProductRepository::delete(store.as_ref(), product.id)
            .await
            .unwrap();

        let result = handler(&store).handle(CheckoutCommand { auth: auth() }).await;

        assert!(matches!(result, Err(OrderError::EmptyCart)));
        // The dangling row was reconciled away.
        assert_eq!(store.cart_item_count().await, 0);
    }

    #[tokio::test]
    async fn stale_quantity_fails_entire_checkout_naming_product() {
        let store = Arc::new(MemoryStore::new());
        let plenty = seed_product(&store, "Plenty", 999, 10).await;
        let mut scarce = seed_product(&store, "Scarce", 500, 5).await;
        seed_item(&store, plenty.id, 1).await;
        seed_item(&store, scarce.id, 4).await;

        // Stock shrank below the carted quantity after the add.
        scarce.set_stock(2);
        ProductRepository::update(store.as_ref(), &scarce)
            .await
            .unwrap();

        let result = handler(&store).handle(CheckoutCommand { auth: auth() }).await;

        assert!(matches!(
            result,
            Err(OrderError::OutOfStock { ref product_name, requested: 4, available: 2, .. })
                if product_name == "Scarce"
        ));
        // All-or-nothing: nothing was ordered, nothing decremented.
        let stored = ProductRepository::find_by_id(store.as_ref(), plenty.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.amount_in_stock, 10);
        assert_eq!(store.cart_item_count().await, 2);
    }

    #[tokio::test]
    async fn concurrent_checkouts_for_last_unit_produce_one_order() {
        let store = Arc::new(MemoryStore::new());
        let product = seed_product(&store, "Last One", 999, 1).await;

        // Two users, each with the last unit in their cart.
        for user in ["user-123", "user-456"] {
            let user_id = UserId::new(user).unwrap();
            let cart = store.find_or_create(&user_id).await.unwrap();
            let item = CartItem::new(CartItemId::new(), cart.id, product.id, 1).unwrap();
            store.save_item(&item).await.unwrap();
        }

        let handler_a = handler(&store);
        let handler_b = handler(&store);
        let auth_a = auth();
        let auth_b = AuthContext::authenticated(AuthenticatedUser::new(
            UserId::new("user-456").unwrap(),
            "bob@example.com",
        ));

        let (result_a, result_b) = tokio::join!(
            handler_a.handle(CheckoutCommand { auth: auth_a }),
            handler_b.handle(CheckoutCommand { auth: auth_b }),
        );

        let successes = [&result_a, &result_b]
            .iter()
            .filter(|r| r.is_ok())
            .count();
        assert_eq!(successes, 1, "exactly one checkout must win");

        let loser = if result_a.is_ok() { result_b } else { result_a };
        assert!(matches!(loser, Err(OrderError::OutOfStock { .. })));

        let stored = ProductRepository::find_by_id(store.as_ref(), product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.amount_in_stock, 0);
    }

    #[tokio::test]
    async fn fails_without_identity() {
        let store = Arc::new(MemoryStore::new());

        let result = handler(&store)
            .handle(CheckoutCommand {
                auth: AuthContext::anonymous(),
            })
            .await;

        assert!(matches!(result, Err(OrderError::AuthRequired)));
    }
}
