//! AddCommentHandler - attaches a free-form comment to a product.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Comment};
use crate::domain::foundation::{AuthContext, CommentId, ProductId};
use crate::ports::{ProductRepository, ReviewRepository};

/// Command to comment on a product.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub auth: AuthContext,
    pub product_id: ProductId,
    pub body: String,
}

/// Handler for adding comments.
pub struct AddCommentHandler {
    products: Arc<dyn ProductRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl AddCommentHandler {
    pub fn new(products: Arc<dyn ProductRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { products, reviews }
    }

    pub async fn handle(
        &self,
        cmd: AddCommentCommand,
    ) -> Result<MutationResult<Comment>, CatalogError> {
        let user = cmd.auth.require()?;

        if self.products.find_by_id(cmd.product_id).await?.is_none() {
            return Err(CatalogError::product_not_found(cmd.product_id));
        }

        let comment = Comment::new(CommentId::new(), cmd.product_id, user.id.clone(), cmd.body)?;
        self.reviews.save_comment(&comment).await?;

        Ok(MutationResult::ok(comment))
    }
}
