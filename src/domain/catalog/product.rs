//! Product entity and listing filter.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CategoryId, Money, ProductId, ProductImageId, SubCategoryId, Timestamp, ValidationError,
};

use super::category::validate_name;

/// Products with stock below this count are considered low-stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub url: String,
}

/// A product in the store.
///
/// # Invariants
///
/// - `price` is strictly positive
/// - `sub_category_id`, when present, must reference a sub-category whose
///   parent equals `category_id` (checked by the operation handlers, which
///   can see both rows)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub amount_in_stock: u32,
    pub category_id: CategoryId,
    pub sub_category_id: Option<SubCategoryId>,
    pub images: Vec<ProductImage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Creates a new product with validated name and price.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or the price is not
    /// strictly positive.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: Option<String>,
        price: Money,
        amount_in_stock: u32,
        category_id: CategoryId,
        sub_category_id: Option<SubCategoryId>,
    ) -> Result<Self, ValidationError> {
        let name = validate_name("name", name)?;
        if !price.is_positive() {
            return Err(ValidationError::invalid_format(
                "price",
                "price must be greater than zero",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            description,
            price,
            amount_in_stock,
            category_id,
            sub_category_id,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames the product.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_name("name", name)?;
        self.touch();
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Replaces the price.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the new price is not strictly positive.
    pub fn set_price(&mut self, price: Money) -> Result<(), ValidationError> {
        if !price.is_positive() {
            return Err(ValidationError::invalid_format(
                "price",
                "price must be greater than zero",
            ));
        }
        self.price = price;
        self.touch();
        Ok(())
    }

    /// Replaces the stock count.
    pub fn set_stock(&mut self, amount_in_stock: u32) {
        self.amount_in_stock = amount_in_stock;
        self.touch();
    }

    /// Moves the product under a different category/sub-category pair.
    pub fn reassign(&mut self, category_id: CategoryId, sub_category_id: Option<SubCategoryId>) {
        self.category_id = category_id;
        self.sub_category_id = sub_category_id;
        self.touch();
    }

    /// Clears the sub-category reference (sub-category deletion detaches).
    pub fn detach_sub_category(&mut self) {
        self.sub_category_id = None;
        self.touch();
    }

    /// Returns true if the requested quantity is currently available.
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        quantity <= self.amount_in_stock
    }

    /// Removes the given quantity from stock.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the quantity exceeds available stock;
    /// stock never goes negative.
    pub fn take_stock(&mut self, quantity: u32) -> Result<(), ValidationError> {
        if !self.has_stock_for(quantity) {
            return Err(ValidationError::out_of_range(
                "quantity",
                0,
                i64::from(self.amount_in_stock),
                i64::from(quantity),
            ));
        }
        self.amount_in_stock -= quantity;
        self.touch();
        Ok(())
    }

    /// Returns true when stock is below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.amount_in_stock < LOW_STOCK_THRESHOLD
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Filter for the product listing query. All fields are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the product name.
    pub name_contains: Option<String>,
    pub category_id: Option<CategoryId>,
    pub sub_category_id: Option<SubCategoryId>,
    /// Inclusive lower price bound, in minor units.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound, in minor units.
    pub max_price_cents: Option<i64>,
    /// Only products with stock below `LOW_STOCK_THRESHOLD`.
    pub low_stock: bool,
}

impl ProductFilter {
    /// Returns true if the product satisfies every set predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name_contains {
            if !product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category_id) = self.category_id {
            if product.category_id != category_id {
                return false;
            }
        }
        if let Some(sub_category_id) = self.sub_category_id {
            if product.sub_category_id != Some(sub_category_id) {
                return false;
            }
        }
        if let Some(min) = self.min_price_cents {
            if product.price.cents < min {
                return false;
            }
        }
        if let Some(max) = self.max_price_cents {
            if product.price.cents > max {
                return false;
            }
        }
        if self.low_stock && !product.is_low_stock() {
            return false;
        }
        true
    }
}
