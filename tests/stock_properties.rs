//! Property tests for the stock invariants.
//!
//! Whatever sequence of carted quantities is thrown at checkout, stock
//! never goes negative and the units sold never exceed the starting stock.

use std::sync::Arc;

use proptest::prelude::*;

use storefront::adapters::MemoryStore;
use storefront::application::handlers::cart::{AddCartItemCommand, AddCartItemHandler};
use storefront::application::handlers::order::{CheckoutCommand, CheckoutHandler};
use storefront::domain::cart::CartItem;
use storefront::domain::catalog::Product;
use storefront::domain::foundation::{
    AuthContext, AuthenticatedUser, CartItemId, CategoryId, Currency, Money, ProductId, UserId,
};
use storefront::ports::{CartRepository, ProductRepository};

fn auth_for(user: &str) -> AuthContext {
    AuthContext::authenticated(AuthenticatedUser::new(
        UserId::new(user).unwrap(),
        format!("{}@example.com", user),
    ))
}

async fn seed_product(store: &MemoryStore, stock: u32) -> ProductId {
    let product = Product::new(
        ProductId::new(),
        "Contested",
        None,
        Money::from_cents(999, Currency::Usd),
        stock,
        CategoryId::new(),
        None,
    )
    .unwrap();
    ProductRepository::save(store, &product).await.unwrap();
    product.id
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Checkouts drawn from arbitrary per-user quantities can never drive
    /// stock below zero, and every unit sold is backed by starting stock.
    #[test]
    fn stock_never_goes_negative(
        initial_stock in 0u32..20,
        quantities in proptest::collection::vec(1u32..8, 1..6),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let store = Arc::new(MemoryStore::new());
            let product_id = seed_product(&store, initial_stock).await;

            // Seed carts directly so quantities above live stock are
            // representable, exactly like a stale cart would be.
            for (i, quantity) in quantities.iter().enumerate() {
                let user_id = UserId::new(format!("user-{}", i)).unwrap();
                let cart = store.find_or_create(&user_id).await.unwrap();
                let item =
                    CartItem::new(CartItemId::new(), cart.id, product_id, *quantity).unwrap();
                store.save_item(&item).await.unwrap();
            }

            let mut sold = 0u32;
            for (i, quantity) in quantities.iter().enumerate() {
                let result = CheckoutHandler::new(store.clone(), store.clone(), store.clone())
                    .handle(CheckoutCommand {
                        auth: auth_for(&format!("user-{}", i)),
                    })
                    .await;
                if result.is_ok() {
                    sold += quantity;
                }

                let product = ProductRepository::find_by_id(store.as_ref(), product_id)
                    .await
                    .unwrap()
                    .unwrap();
                prop_assert!(product.amount_in_stock <= initial_stock);
            }

            let product = ProductRepository::find_by_id(store.as_ref(), product_id)
                .await
                .unwrap()
                .unwrap();
            prop_assert_eq!(product.amount_in_stock, initial_stock - sold);
            prop_assert!(sold <= initial_stock);
            Ok(())
        })?;
    }

    /// Adding to a cart is always bounded by live stock at add time.
    #[test]
    fn add_to_cart_is_bounded_by_stock(
        stock in 1u32..10,
        attempts in proptest::collection::vec(1u32..12, 1..5),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let store = Arc::new(MemoryStore::new());
            let product_id = seed_product(&store, stock).await;
            let handler = AddCartItemHandler::new(store.clone(), store.clone());

            let mut carted = 0u32;
            for quantity in attempts {
                let result = handler
                    .handle(AddCartItemCommand {
                        auth: auth_for("alice"),
                        product_id,
                        quantity,
                    })
                    .await;
                if result.is_ok() {
                    carted += quantity;
                }
                prop_assert!(carted <= stock, "cart may never exceed stock at add time");
            }
            Ok(())
        })?;
    }
}
