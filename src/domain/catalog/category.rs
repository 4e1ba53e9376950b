//! Category and SubCategory entities.
//!
//! Categories are the primary anchor of the catalog tree. A SubCategory
//! belongs to exactly one Category and is cascade-deleted with it; products
//! under a deleted SubCategory are detached, not deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, SubCategoryId, Timestamp, ValidationError};

/// Validates and normalizes an entity name: trimmed, non-empty.
pub(crate) fn validate_name(field: &str, name: impl Into<String>) -> Result<String, ValidationError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Top-level catalog category.
///
/// # Invariants
///
/// - `name` is non-empty and unique across categories (enforced at the
///   storage level by a unique constraint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// Creates a new category with a validated name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or whitespace-only.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = validate_name("name", name)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames the category.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the new name is empty or whitespace-only.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_name("name", name)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

/// Sub-category under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub name: String,
    pub category_id: CategoryId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SubCategory {
    /// Creates a new sub-category with a validated name.
    ///
    /// The referenced category must exist; that check belongs to the
    /// operation handler since it requires a repository lookup.
    pub fn new(
        id: SubCategoryId,
        name: impl Into<String>,
        category_id: CategoryId,
    ) -> Result<Self, ValidationError> {
        let name = validate_name("name", name)?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            category_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames the sub-category.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_name("name", name)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

/// A category with its nested sub-categories, as served by the tree query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    pub sub_categories: Vec<SubCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_trims_name() {
        let category = Category::new(CategoryId::new(), "  Electronics  ").unwrap();
        assert_eq!(category.name, "Electronics");
    }

    #[test]
    fn new_category_rejects_empty_name() {
        let result = Category::new(CategoryId::new(), "");
        assert!(result.is_err());
    }

    #[test]
    fn new_category_rejects_whitespace_only_name() {
        let result = Category::new(CategoryId::new(), "   \t ");
        assert!(result.is_err());
    }

    #[test]
    fn rename_updates_name_and_timestamp() {
        let mut category = Category::new(CategoryId::new(), "Books").unwrap();
        let created = category.created_at;
        category.rename("Used Books").unwrap();
        assert_eq!(category.name, "Used Books");
        assert!(category.updated_at >= created);
    }

    #[test]
    fn rename_rejects_empty_name() {
        let mut category = Category::new(CategoryId::new(), "Books").unwrap();
        assert!(category.rename(" ").is_err());
        assert_eq!(category.name, "Books");
    }

    #[test]
    fn sub_category_keeps_parent_reference() {
        let parent = CategoryId::new();
        let sub = SubCategory::new(SubCategoryId::new(), "Laptops", parent).unwrap();
        assert_eq!(sub.category_id, parent);
    }

    #[test]
    fn sub_category_rejects_empty_name() {
        let result = SubCategory::new(SubCategoryId::new(), "", CategoryId::new());
        assert!(result.is_err());
    }
}
