//! Catalog operation handlers.

mod create_category;
mod create_product;
mod create_sub_category;
mod delete_category;
mod delete_product;
mod delete_sub_category;
mod get_category_tree;
mod get_product;
mod list_products;
mod update_category;
mod update_product;
mod update_sub_category;

pub use create_category::{CreateCategoryCommand, CreateCategoryHandler};
pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use create_sub_category::{CreateSubCategoryCommand, CreateSubCategoryHandler};
pub use delete_category::{DeleteCategoryCommand, DeleteCategoryHandler, DeletedCategory};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use delete_sub_category::{
    DeleteSubCategoryCommand, DeleteSubCategoryHandler, DeletedSubCategory,
};
pub use get_category_tree::GetCategoryTreeHandler;
pub use get_product::{GetProductHandler, ProductDetail};
pub use list_products::{ListProductsHandler, ListProductsQuery};
pub use update_category::{UpdateCategoryCommand, UpdateCategoryHandler};
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
pub use update_sub_category::{UpdateSubCategoryCommand, UpdateSubCategoryHandler};
