//! Defines the product store trait.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    pagination::PageWindow,
    product::{NewProduct, Product, ProductFilter},
};

/// Handles the replacement and retrieval of products.
///
/// The store is only written to by seeding, which replaces the whole
/// collection at once. Readers must never observe a partially replaced
/// collection.
pub trait ProductStore {
    /// Retrieve the products matching `filter` in insertion order.
    ///
    /// If `window` is given, only the products in that window are returned.
    fn find(&self, filter: &ProductFilter, window: Option<PageWindow>)
    -> Result<Vec<Product>, Error>;

    /// Count all the products matching `filter`.
    fn count(&self, filter: &ProductFilter) -> Result<u64, Error>;

    /// Count the products matching `filter` in each category.
    ///
    /// Categories with no matching products are left out.
    fn count_by_category(&self, filter: &ProductFilter) -> Result<Vec<CategoryCount>, Error>;

    /// Delete every product and insert `products` in their place as one
    /// atomic operation, returning the number of products inserted.
    fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, Error>;
}

/// The number of products in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category label.
    pub category: String,
    /// The number of products in the category.
    pub count: u64,
}
