//! Defines the core data models and database schema for products.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for product IDs.
pub type ProductId = i64;

/// A product listed in the store along with the outcome of its sale.
///
/// To create a new `Product`, use [Product::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The ID of the product, assigned when it is inserted.
    pub id: ProductId,
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    pub description: String,
    /// The listed price, never negative.
    pub price: f64,
    /// A short label grouping similar products, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product has sold.
    pub sold: bool,
    /// When the product was sold or listed for sale.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Product {
    /// Create a new product.
    ///
    /// Shortcut for [NewProduct] for discoverability.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> NewProduct {
        NewProduct {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: String::new(),
            image: String::new(),
            sold: false,
            date_of_sale,
        }
    }
}

/// A product that has not been inserted into the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    pub description: String,
    /// The listed price. Callers must ensure it is finite and not negative.
    pub price: f64,
    /// A short label grouping similar products.
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product has sold.
    pub sold: bool,
    /// When the product was sold or listed for sale.
    pub date_of_sale: OffsetDateTime,
}

impl NewProduct {
    /// Set the description for the product.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the product.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the image URL for the product.
    pub fn image(mut self, image: &str) -> Self {
        self.image = image.to_owned();
        self
    }

    /// Set whether the product has sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// The calendar month (1-12) of the sale date in UTC.
    pub fn sale_month(&self) -> u8 {
        self.date_of_sale.to_offset(UtcOffset::UTC).month().into()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected for a [Product], in the order [map_product_row] reads them.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, title, description, price, category, image, sold, date_of_sale";

/// Create the product table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS product (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                image TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                title_folded TEXT NOT NULL,
                description_folded TEXT NOT NULL
                )",
        (),
    )?;

    // Every chart and statistic is scoped to a month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_product_sale_month ON product(sale_month);",
        (),
    )?;

    Ok(())
}

/// Lowercase `text` so that searches can ignore case outside of ASCII.
pub(crate) fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Map a database row to a Product.
pub fn map_product_row(row: &Row) -> Result<Product, rusqlite::Error> {
    Ok(Product {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}
