//! Implements a struct that holds the state of the REST server.

use crate::{
    pagination::PaginationConfig,
    product::ProductStore,
    seed::{SeedSource, Seeder},
};

/// The state of the REST server.
///
/// `S` is the product store and `U` is where seed data is fetched from.
#[derive(Debug)]
pub struct AppState<S, U> {
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The store for reading products.
    pub store: S,

    /// Replaces the products in `store` with the records from the seed source.
    pub seeder: Seeder<S, U>,
}

// Derived `Clone` would require `U: Clone`.
impl<S, U> Clone for AppState<S, U>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            pagination_config: self.pagination_config.clone(),
            store: self.store.clone(),
            seeder: self.seeder.clone(),
        }
    }
}

impl<S, U> AppState<S, U>
where
    S: ProductStore + Clone,
    U: SeedSource,
{
    /// Create a new [AppState] that serves products from `store` and seeds
    /// it from `seed_source`.
    ///
    /// The store's tables must already exist, see [crate::initialize_db].
    pub fn new(store: S, seed_source: U, pagination_config: PaginationConfig) -> Self {
        Self {
            pagination_config,
            seeder: Seeder::new(store.clone(), seed_source),
            store,
        }
    }
}
