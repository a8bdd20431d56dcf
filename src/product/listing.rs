//! The paginated and searchable transaction listing.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    pagination::{Page, PaginationConfig},
    product::{Product, ProductFilter, ProductStore},
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState<S> {
    /// The store to read products from.
    pub store: S,
    /// The config that controls page numbers and sizes.
    pub pagination_config: PaginationConfig,
}

impl<S, U> FromRef<AppState<S, U>> for TransactionsState<S>
where
    S: Clone,
{
    fn from_ref(state: &AppState<S, U>) -> Self {
        Self {
            store: state.store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the transaction listing.
///
/// All values are kept as strings so that invalid numbers are reported as
/// pagination errors rather than rejected by the extractor.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TransactionsQuery {
    /// The one-based page number.
    pub page: Option<String>,
    /// The number of transactions per page.
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    /// Text to search for in titles and descriptions, or a price.
    pub search: Option<String>,
    /// A month name or number to restrict the listing to.
    pub month: Option<String>,
}

/// One page of transactions and the numbers needed to page through the rest.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsPage {
    /// The transactions on this page.
    pub transactions: Vec<Product>,
    /// The number of pages of matching transactions.
    pub total_pages: u64,
    /// The page number that was requested.
    pub current_page: u64,
    /// The number of matching transactions across all pages.
    pub total_items: u64,
}

/// Get one page of the transactions matching `query`.
///
/// # Errors
/// Returns a:
/// - [Error::InvalidPagination] if the page number or size is invalid,
/// - [Error::InvalidMonth] if the month cannot be resolved,
/// - or [Error::StoreUnavailable] if the store cannot be read.
pub fn list_transactions<S>(
    query: &TransactionsQuery,
    pagination_config: &PaginationConfig,
    store: &S,
) -> Result<TransactionsPage, Error>
where
    S: ProductStore,
{
    let page = Page::parse(
        query.page.as_deref(),
        query.per_page.as_deref(),
        pagination_config,
    )?;
    let filter = ProductFilter::build(query.search.as_deref(), query.month.as_deref())?;

    let transactions = store.find(&filter, Some(page.window()))?;
    let total_items = store.count(&filter)?;

    Ok(TransactionsPage {
        transactions,
        total_pages: page.count_pages(total_items),
        current_page: page.number,
        total_items,
    })
}

/// Route handler for the transaction listing.
pub async fn get_transactions<S>(
    State(state): State<TransactionsState<S>>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsPage>, Error>
where
    S: ProductStore,
{
    list_transactions(&query, &state.pagination_config, &state.store)
        .inspect_err(|error| tracing::debug!("could not list transactions: {error}"))
        .map(Json)
}
