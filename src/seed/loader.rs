//! Replaces the product collection with the upstream records.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::Mutex;

use crate::{
    AppState, Error,
    product::{NewProduct, Product, ProductStore},
    seed::source::{SeedSource, UpstreamProduct},
};

/// Seeds a product store from a [SeedSource], one seed at a time.
#[derive(Debug)]
pub struct Seeder<S, U> {
    store: S,
    source: Arc<U>,
    gate: Arc<Mutex<()>>,
}

// Derived `Clone` would require `U: Clone`.
impl<S, U> Clone for Seeder<S, U>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            source: self.source.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<S, U> FromRef<AppState<S, U>> for Seeder<S, U>
where
    S: Clone,
{
    fn from_ref(state: &AppState<S, U>) -> Self {
        state.seeder.clone()
    }
}

impl<S, U> Seeder<S, U>
where
    S: ProductStore,
    U: SeedSource,
{
    /// Create a seeder that writes the records from `source` to `store`.
    pub fn new(store: S, source: U) -> Self {
        Self {
            store,
            source: Arc::new(source),
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Fetch the upstream records and replace the store contents with them,
    /// returning the number of records inserted.
    ///
    /// Concurrent calls wait for the seed in progress to finish. The store is
    /// left untouched unless every record is written.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::SeedSourceUnavailable] if the upstream feed cannot be fetched,
    /// - [Error::InvalidSeedData] if an upstream record is invalid,
    /// - or [Error::SeedWriteFailed] if the store cannot be replaced.
    pub async fn seed(&self) -> Result<usize, Error> {
        let _guard = self.gate.lock().await;

        let records = self.source.fetch().await?;
        let products = validate_products(records)?;

        let inserted = self.store.replace_all(products).map_err(|error| {
            tracing::error!("could not replace products: {error}");
            Error::SeedWriteFailed(error.to_string())
        })?;

        tracing::info!("seeded {inserted} products");

        Ok(inserted)
    }
}

/// Convert upstream records to products, stopping at the first invalid one.
///
/// # Errors
/// Returns [Error::InvalidSeedData] naming the index of the first record with
/// an empty title or category, a negative or non-finite price, or a sale date
/// that is not an RFC 3339 timestamp.
pub(super) fn validate_products(records: Vec<UpstreamProduct>) -> Result<Vec<NewProduct>, Error> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            validate_product(record)
                .map_err(|reason| Error::InvalidSeedData(format!("record {index} {reason}")))
        })
        .collect()
}

fn validate_product(record: UpstreamProduct) -> Result<NewProduct, String> {
    if record.title.trim().is_empty() {
        return Err("has an empty title".to_owned());
    }

    if record.category.trim().is_empty() {
        return Err("has an empty category".to_owned());
    }

    if !record.price.is_finite() || record.price < 0.0 {
        return Err(format!("has an invalid price {}", record.price));
    }

    let date_of_sale = OffsetDateTime::parse(&record.date_of_sale, &Rfc3339)
        .map_err(|error| format!("has an invalid date of sale: {error}"))?;

    Ok(Product::build(&record.title, record.price, date_of_sale)
        .description(record.description.as_deref().unwrap_or_default())
        .category(&record.category)
        .image(record.image.as_deref().unwrap_or_default())
        .sold(record.sold))
}

/// The response body of a successful seed.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    /// A human readable summary of the seed.
    pub message: String,
}

/// Replace the product collection with the records from the upstream feed.
pub async fn initialize_database<S, U>(
    State(seeder): State<Seeder<S, U>>,
) -> Result<(StatusCode, Json<SeedResponse>), Error>
where
    S: ProductStore + Send + Sync,
    U: SeedSource,
{
    let inserted = seeder.seed().await?;

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            message: format!("Database initialized with {inserted} products"),
        }),
    ))
}
