#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    db::initialize,
    pagination::PageWindow,
    product::{CategoryCount, NewProduct, Product, ProductFilter, ProductStore, SQLiteProductStore},
    seed::{SeedSource, UpstreamProduct},
};

/// An empty product store backed by an in-memory database.
pub(crate) fn get_test_store() -> SQLiteProductStore {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    SQLiteProductStore::new(Arc::new(Mutex::new(connection)))
}

/// A product that is not stored anywhere.
pub(crate) fn product_at(id: i64, price: f64, date_of_sale: OffsetDateTime) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        description: String::new(),
        price,
        category: "electronics".to_owned(),
        image: String::new(),
        sold: id % 2 == 0,
        date_of_sale,
    }
}

/// A product store where every operation fails.
#[derive(Debug, Clone)]
pub(crate) struct UnavailableStore;

impl UnavailableStore {
    fn error() -> Error {
        Error::StoreUnavailable("the database is locked".to_owned())
    }
}

impl ProductStore for UnavailableStore {
    fn find(
        &self,
        _filter: &ProductFilter,
        _window: Option<PageWindow>,
    ) -> Result<Vec<Product>, Error> {
        Err(Self::error())
    }

    fn count(&self, _filter: &ProductFilter) -> Result<u64, Error> {
        Err(Self::error())
    }

    fn count_by_category(&self, _filter: &ProductFilter) -> Result<Vec<CategoryCount>, Error> {
        Err(Self::error())
    }

    fn replace_all(&self, _products: Vec<NewProduct>) -> Result<usize, Error> {
        Err(Self::error())
    }
}

/// A seed source that always returns the same records.
#[derive(Debug, Clone)]
pub(crate) struct CannedSource(pub Vec<UpstreamProduct>);

impl SeedSource for CannedSource {
    async fn fetch(&self) -> Result<Vec<UpstreamProduct>, Error> {
        Ok(self.0.clone())
    }
}

/// A seed source that can never be reached.
#[derive(Debug, Clone)]
pub(crate) struct FailingSource;

impl SeedSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<UpstreamProduct>, Error> {
        Err(Error::SeedSourceUnavailable("connection refused".to_owned()))
    }
}

/// An upstream record sold on 27 November 2021.
pub(crate) fn upstream_product(title: &str, price: f64, sold: bool) -> UpstreamProduct {
    UpstreamProduct {
        title: title.to_owned(),
        price,
        description: Some(format!("A {title}")),
        category: "electronics".to_owned(),
        image: None,
        sold,
        date_of_sale: "2021-11-27T20:29:54+05:30".to_owned(),
    }
}
