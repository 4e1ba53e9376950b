//! RemoveCartItemHandler - idempotent cart item removal.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::cart::CartError;
use crate::domain::foundation::{AuthContext, CartItemId};
use crate::ports::CartRepository;

/// Command to remove a cart item.
#[derive(Debug, Clone)]
pub struct RemoveCartItemCommand {
    pub auth: AuthContext,
    pub cart_item_id: CartItemId,
}

/// Handler for cart item removal.
///
/// Removal is idempotent: removing an absent item succeeds as a no-op, so
/// a double-submitted remove never surfaces an error.
pub struct RemoveCartItemHandler {
    carts: Arc<dyn CartRepository>,
}

impl RemoveCartItemHandler {
    pub fn new(carts: Arc<dyn CartRepository>) -> Self {
        Self { carts }
    }

    pub async fn handle(
        &self,
        cmd: RemoveCartItemCommand,
    ) -> Result<MutationResult<CartItemId>, CartError> {
        let user = cmd.auth.require()?;

        // Only items in the caller's own cart are ever touched.
        if let Some(cart) = self.carts.find_by_user(&user.id).await? {
            if self
                .carts
                .find_item(cart.id, cmd.cart_item_id)
                .await?
                .is_some()
            {
                self.carts.delete_item(cmd.cart_item_id).await?;
            }
        }

        Ok(MutationResult::ok(cmd.cart_item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::cart::CartItem;
    use crate::domain::foundation::{AuthenticatedUser, ProductId, UserId};

    fn auth_for(user: &str) -> AuthContext {
        AuthContext::authenticated(AuthenticatedUser::new(
            UserId::new(user).unwrap(),
            format!("{}@example.com", user),
        ))
    }

    async fn seeded() -> (RemoveCartItemHandler, Arc<MemoryStore>, CartItemId) {
        let store = Arc::new(MemoryStore::new());
        let cart = store
            .find_or_create(&UserId::new("user-123").unwrap())
            .await
            .unwrap();
        let item = CartItem::new(CartItemId::new(), cart.id, ProductId::new(), 2).unwrap();
        store.save_item(&item).await.unwrap();
        (RemoveCartItemHandler::new(store.clone()), store, item.id)
    }

    #[tokio::test]
    async fn removes_existing_item() {
        let (handler, store, item_id) = seeded().await;

        let result = handler
            .handle(RemoveCartItemCommand {
                auth: auth_for("user-123"),
                cart_item_id: item_id,
            })
            .await
            .unwrap();

        assert!(result.ok);
        assert_eq!(store.cart_item_count().await, 0);
    }

    #[tokio::test]
    async fn double_remove_succeeds() {
        let (handler, _store, item_id) = seeded().await;

        for _ in 0..2 {
            let result = handler
                .handle(RemoveCartItemCommand {
                    auth: auth_for("user-123"),
                    cart_item_id: item_id,
                })
                .await;
            assert!(result.is_ok());
        }
    }

    #[tokio::test]
    async fn removing_unknown_item_is_a_noop() {
        let (handler, _store, _item_id) = seeded().await;

        let result = handler
            .handle(RemoveCartItemCommand {
                auth: auth_for("user-123"),
                cart_item_id: CartItemId::new(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cannot_remove_another_users_item() {
        let (handler, store, item_id) = seeded().await;

        let result = handler
            .handle(RemoveCartItemCommand {
                auth: auth_for("intruder"),
                cart_item_id: item_id,
            })
            .await;

        // No-op success for the intruder, and the item survives.
        assert!(result.is_ok());
        assert_eq!(store.cart_item_count().await, 1);
    }

    #[tokio::test]
    async fn fails_without_identity() {
        let (handler, _store, item_id) = seeded().await;

        let result = handler
            .handle(RemoveCartItemCommand {
                auth: AuthContext::anonymous(),
                cart_item_id: item_id,
            })
            .await;

        assert!(matches!(result, Err(CartError::AuthRequired)));
    }
}
