//! Products and the queries over them.
//!
//! This module contains everything related to the product collection:
//! - The `Product` model and `NewProduct` builder
//! - Month resolution and the filters built from request parameters
//! - The `ProductStore` trait and its SQLite implementation
//! - The paginated transaction listing

mod filter;
mod listing;
mod model;
mod month;
mod sqlite;
mod store;

pub use filter::{ProductFilter, SearchTerm};
pub use listing::{TransactionsPage, TransactionsQuery, get_transactions};
pub use model::{NewProduct, Product, create_product_table};
pub use month::{resolve_month, resolve_numeric_month};
pub use sqlite::SQLiteProductStore;
pub use store::{CategoryCount, ProductStore};
