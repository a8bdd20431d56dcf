//! Implements a SQLite backed product store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    pagination::PageWindow,
    product::{
        NewProduct, Product, ProductFilter,
        model::{PRODUCT_COLUMNS, fold_case, map_product_row},
        store::{CategoryCount, ProductStore},
    },
};

/// Stores products in a SQLite database.
///
/// The product table must already exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteProductStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteProductStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::StoreUnavailable("could not acquire the database lock".to_owned()))
    }
}

impl ProductStore for SQLiteProductStore {
    /// Query for products in the database, ordered by ID.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL error.
    fn find(
        &self,
        filter: &ProductFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<Product>, Error> {
        let (where_clause, params) = where_clause(filter);
        let mut query = format!("SELECT {PRODUCT_COLUMNS} FROM product {where_clause} ORDER BY id ASC");

        if let Some(window) = window {
            // SQLite integers are signed 64-bit.
            let limit = window.limit.min(i64::MAX as u64);
            let offset = window.offset.min(i64::MAX as u64);
            query.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
        }

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(params), map_product_row)?
            .collect::<Result<Vec<Product>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }

    /// Count the products in the database matching `filter`.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL error.
    fn count(&self, filter: &ProductFilter) -> Result<u64, Error> {
        let (where_clause, params) = where_clause(filter);
        let query = format!("SELECT COUNT(id) FROM product {where_clause}");

        let count: i64 = self
            .lock()?
            .query_row(&query, params_from_iter(params), |row| row.get(0))?;

        Ok(count.unsigned_abs())
    }

    /// Count the products matching `filter` in each category, ordered by category.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL error.
    fn count_by_category(&self, filter: &ProductFilter) -> Result<Vec<CategoryCount>, Error> {
        let (where_clause, params) = where_clause(filter);
        let query = format!(
            "SELECT category, COUNT(id) FROM product {where_clause} \
            GROUP BY category ORDER BY category ASC"
        );

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(params), |row| {
                let count: i64 = row.get(1)?;

                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: count.unsigned_abs(),
                })
            })?
            .collect::<Result<Vec<CategoryCount>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }

    /// Replace every product in the database with `products`.
    ///
    /// The delete and inserts run in one SQL transaction while the connection
    /// lock is held, so other callers see either the old or the new products.
    ///
    /// # Errors
    /// This function will return a [Error::StoreUnavailable] if there is a SQL
    /// error, in which case the existing products are kept.
    fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, Error> {
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction()?;

        tx.execute("DELETE FROM product", ())?;

        let mut stmt = tx.prepare(
            "INSERT INTO product
                (title, description, price, category, image, sold, date_of_sale, sale_month,
                 title_folded, description_folded)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        let mut inserted = 0;
        for product in products {
            let sale_month = product.sale_month();
            let title_folded = fold_case(&product.title);
            let description_folded = fold_case(&product.description);

            inserted += stmt.execute((
                product.title,
                product.description,
                product.price,
                product.category,
                product.image,
                product.sold,
                product.date_of_sale,
                sale_month,
                title_folded,
                description_folded,
            ))?;
        }

        drop(stmt);

        tx.commit()?;
        Ok(inserted)
    }
}

/// Translate `filter` into a SQL WHERE clause and its positional parameters.
///
/// Returns an empty clause when the filter matches everything.
fn where_clause(filter: &ProductFilter) -> (String, Vec<Value>) {
    let mut where_clause_parts = vec![];
    let mut query_parameters = vec![];

    if let Some(month) = filter.month {
        query_parameters.push(Value::Integer(u8::from(month).into()));
        where_clause_parts.push(format!("sale_month = ?{}", query_parameters.len()));
    }

    if let Some(search) = &filter.search {
        // Both sides are folded in Rust since LIKE only ignores ASCII case.
        let pattern = format!("%{}%", escape_like(&fold_case(&search.text)));
        query_parameters.push(Value::Text(pattern));
        let text_param = query_parameters.len();

        let mut alternatives = vec![
            format!("title_folded LIKE ?{text_param} ESCAPE '\\'"),
            format!("description_folded LIKE ?{text_param} ESCAPE '\\'"),
        ];

        if let Some(price) = search.price {
            query_parameters.push(Value::Real(price));
            alternatives.push(format!("price = ?{}", query_parameters.len()));
        }

        where_clause_parts.push(format!("({})", alternatives.join(" OR ")));
    }

    if where_clause_parts.is_empty() {
        (String::new(), query_parameters)
    } else {
        (
            String::from("WHERE ") + &where_clause_parts.join(" AND "),
            query_parameters,
        )
    }
}

/// Escape the LIKE wildcards in `text` so that it only matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}
