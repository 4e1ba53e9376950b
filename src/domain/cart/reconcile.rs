//! Stale-cart reconciliation.
//!
//! Cart contents drift: products get deleted and stock shrinks while items
//! sit in a cart. Reconciliation is a pure function over a cart snapshot and
//! the current product set, shared by the read path and checkout. The two
//! callers react differently: a read silently drops items whose product is
//! gone and keeps stock-short items visible, while checkout treats any
//! shortfall as a hard failure.

use std::collections::HashMap;

use crate::domain::catalog::Product;
use crate::domain::foundation::{CartItemId, ProductId};

use super::CartItem;

/// An item whose quantity now exceeds the product's available stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockShortfall {
    pub item_id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub requested: u32,
    pub available: u32,
}

/// Outcome of reconciling a cart snapshot against current products.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Items whose product still exists, in snapshot order.
    pub valid: Vec<CartItem>,
    /// Items whose product has been deleted; their rows should be removed.
    pub dropped: Vec<CartItemId>,
    /// Valid items that exceed current stock (subset of `valid`).
    pub short: Vec<StockShortfall>,
}

impl Reconciliation {
    /// Returns true when no item exceeds current stock.
    pub fn fully_in_stock(&self) -> bool {
        self.short.is_empty()
    }
}

/// Reconciles cart items against the current product set.
pub fn reconcile(items: &[CartItem], products: &HashMap<ProductId, Product>) -> Reconciliation {
    let mut outcome = Reconciliation::default();
    for item in items {
        match products.get(&item.product_id) {
            None => outcome.dropped.push(item.id),
            Some(product) => {
                if !product.has_stock_for(item.quantity) {
                    outcome.short.push(StockShortfall {
                        item_id: item.id,
                        product_id: product.id,
                        product_name: product.name.clone(),
                        requested: item.quantity,
                        available: product.amount_in_stock,
                    });
                }
                outcome.valid.push(item.clone());
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CartId, CategoryId, Currency, Money};

    fn test_product(stock: u32) -> Product {
        Product::new(
            ProductId::new(),
            "Widget",
            None,
            Money::from_cents(999, Currency::Usd),
            stock,
            CategoryId::new(),
            None,
        )
        .unwrap()
    }

    fn item_for(product_id: ProductId, quantity: u32) -> CartItem {
        CartItem::new(CartItemId::new(), CartId::new(), product_id, quantity).unwrap()
    }

    #[test]
    fn keeps_items_with_live_products() {
        let product = test_product(10);
        let item = item_for(product.id, 2);
        let products = HashMap::from([(product.id, product)]);

        let outcome = reconcile(&[item.clone()], &products);

        assert_eq!(outcome.valid, vec![item]);
        assert!(outcome.dropped.is_empty());
        assert!(outcome.fully_in_stock());
    }

    #[test]
    fn drops_items_whose_product_is_gone() {
        let item = item_for(ProductId::new(), 2);
        let outcome = reconcile(&[item.clone()], &HashMap::new());

        assert!(outcome.valid.is_empty());
        assert_eq!(outcome.dropped, vec![item.id]);
    }

    #[test]
    fn stock_short_items_stay_valid_but_are_flagged() {
        let product = test_product(1);
        let item = item_for(product.id, 3);
        let products = HashMap::from([(product.id, product.clone())]);

        let outcome = reconcile(&[item.clone()], &products);

        assert_eq!(outcome.valid, vec![item.clone()]);
        assert!(!outcome.fully_in_stock());
        let shortfall = &outcome.short[0];
        assert_eq!(shortfall.item_id, item.id);
        assert_eq!(shortfall.product_name, "Widget");
        assert_eq!(shortfall.requested, 3);
        assert_eq!(shortfall.available, 1);
    }

    #[test]
    fn exact_stock_is_not_a_shortfall() {
        let product = test_product(3);
        let item = item_for(product.id, 3);
        let products = HashMap::from([(product.id, product)]);

        let outcome = reconcile(&[item], &products);
        assert!(outcome.fully_in_stock());
    }

    #[test]
    fn mixed_cart_partitions_correctly() {
        let live = test_product(5);
        let short = test_product(1);
        let live_item = item_for(live.id, 2);
        let short_item = item_for(short.id, 4);
        let gone_item = item_for(ProductId::new(), 1);
        let products = HashMap::from([(live.id, live), (short.id, short)]);

        let outcome = reconcile(
            &[live_item.clone(), short_item.clone(), gone_item.clone()],
            &products,
        );

        assert_eq!(outcome.valid.len(), 2);
        assert_eq!(outcome.dropped, vec![gone_item.id]);
        assert_eq!(outcome.short.len(), 1);
        assert_eq!(outcome.short[0].item_id, short_item.id);
    }
}
