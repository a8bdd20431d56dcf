//! Groups products into buckets for the bar and pie charts.
//!
//! The bar chart counts products per fixed price band, the pie chart counts
//! products per category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    product::{CategoryCount, Product, ProductFilter, ProductStore},
};

/// A price interval on the bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct PriceBand {
    /// The label shown for the band, e.g. "101-200".
    pub label: &'static str,
    /// The inclusive upper bound of the band, `None` for the last band.
    pub max: Option<f64>,
}

impl PriceBand {
    const fn new(label: &'static str, max: Option<f64>) -> Self {
        Self { label, max }
    }
}

/// The bar chart bands in display order.
///
/// A band covers prices above the previous band's maximum up to and including
/// its own maximum, so every non-negative price falls in exactly one band.
pub(super) const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand::new("0-100", Some(100.0)),
    PriceBand::new("101-200", Some(200.0)),
    PriceBand::new("201-300", Some(300.0)),
    PriceBand::new("301-400", Some(400.0)),
    PriceBand::new("401-500", Some(500.0)),
    PriceBand::new("501-600", Some(600.0)),
    PriceBand::new("601-700", Some(700.0)),
    PriceBand::new("701-800", Some(800.0)),
    PriceBand::new("801-900", Some(900.0)),
    PriceBand::new("901-above", None),
];

/// The number of products in a price band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeCount {
    /// The label of the price band.
    pub price_range: String,
    /// The number of products in the band.
    pub count: u64,
}

/// The index into [PRICE_BANDS] of the band that `price` falls in.
fn band_index(price: f64) -> usize {
    PRICE_BANDS
        .iter()
        .position(|band| band.max.is_none_or(|max| price <= max))
        .unwrap_or(PRICE_BANDS.len() - 1)
}

/// Count `products` per price band.
///
/// Every band is included in band order, even when its count is zero.
pub(super) fn count_by_price_band(products: &[Product]) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_BANDS.len()];

    for product in products {
        counts[band_index(product.price)] += 1;
    }

    PRICE_BANDS
        .iter()
        .zip(counts)
        .map(|(band, count)| PriceRangeCount {
            price_range: band.label.to_owned(),
            count,
        })
        .collect()
}

/// Count `products` per category, ordered by category.
///
/// Only categories with at least one product are included.
pub(super) fn count_by_category(products: &[Product]) -> Vec<CategoryCount> {
    let mut counts = BTreeMap::<&str, u64>::new();

    for product in products {
        *counts.entry(product.category.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_owned(),
            count,
        })
        .collect()
}

/// Get the bar chart buckets for the products sold in `month` of any year.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the store cannot be read.
pub fn bar_chart_data<S>(month: Month, store: &S) -> Result<Vec<PriceRangeCount>, Error>
where
    S: ProductStore,
{
    let products = store
        .find(&ProductFilter::for_month(month), None)
        .inspect_err(|error| tracing::error!("could not get products for {month}: {error}"))?;

    Ok(count_by_price_band(&products))
}

/// Get the pie chart buckets for the products sold in `month` of any year.
///
/// Only categories with at least one product are included. Callers should
/// not depend on the order of the entries.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the store cannot be read.
pub fn pie_chart_data<S>(month: Month, store: &S) -> Result<Vec<CategoryCount>, Error>
where
    S: ProductStore,
{
    store
        .count_by_category(&ProductFilter::for_month(month))
        .inspect_err(|error| tracing::error!("could not count categories for {month}: {error}"))
}
