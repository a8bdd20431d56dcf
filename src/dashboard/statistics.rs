//! Monthly sale statistics.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    product::{Product, ProductFilter, ProductStore},
};

/// Sale totals for the products in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    /// The sum of the prices of the sold products.
    pub total_sale_amount: f64,
    /// The number of sold products.
    pub total_sold_items: u64,
    /// The number of products that have not sold.
    pub total_not_sold_items: u64,
}

/// Reduce `products` to their sale totals.
///
/// Each total is zero when no product contributes to it.
pub(super) fn summarize_sales(products: &[Product]) -> MonthlyStatistics {
    let mut statistics = MonthlyStatistics {
        total_sale_amount: 0.0,
        total_sold_items: 0,
        total_not_sold_items: 0,
    };

    for product in products {
        if product.sold {
            statistics.total_sale_amount += product.price;
            statistics.total_sold_items += 1;
        } else {
            statistics.total_not_sold_items += 1;
        }
    }

    statistics
}

/// Get the sale totals for the products sold in `month` of any year.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the store cannot be read.
pub fn monthly_statistics<S>(month: Month, store: &S) -> Result<MonthlyStatistics, Error>
where
    S: ProductStore,
{
    let products = store
        .find(&ProductFilter::for_month(month), None)
        .inspect_err(|error| tracing::error!("could not get products for {month}: {error}"))?;

    Ok(summarize_sales(&products))
}
