//! AddRatingHandler - attaches a star rating to a product.

use std::sync::Arc;

use crate::application::MutationResult;
use crate::domain::catalog::{CatalogError, Rating};
use crate::domain::foundation::{AuthContext, ProductId, RatingId};
use crate::ports::{ProductRepository, ReviewRepository};

/// Command to rate a product.
#[derive(Debug, Clone)]
pub struct AddRatingCommand {
    pub auth: AuthContext,
    pub product_id: ProductId,
    pub stars: u8,
    pub comment: Option<String>,
}

/// Handler for adding ratings.
pub struct AddRatingHandler {
    products: Arc<dyn ProductRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl AddRatingHandler {
    pub fn new(products: Arc<dyn ProductRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { products, reviews }
    }

    pub async fn handle(
        &self,
        cmd: AddRatingCommand,
    ) -> Result<MutationResult<Rating>, CatalogError> {
        let user = cmd.auth.require()?;

        if self.products.find_by_id(cmd.product_id).await?.is_none() {
            return Err(CatalogError::product_not_found(cmd.product_id));
        }

        let rating = Rating::new(
            RatingId::new(),
            cmd.product_id,
            user.id.clone(),
            cmd.stars,
            cmd.comment,
        )?;
        self.reviews.save_rating(&rating).await?;

        Ok(MutationResult::ok(rating))
    }
}
