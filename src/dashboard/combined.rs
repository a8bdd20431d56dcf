//! Combines the statistics and both charts into one dashboard payload.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    dashboard::{
        charts::{PriceRangeCount, count_by_category, count_by_price_band},
        statistics::{MonthlyStatistics, summarize_sales},
    },
    product::{CategoryCount, ProductFilter, ProductStore},
};

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// The sale totals for the month.
    pub monthly_statistics_data: MonthlyStatistics,
    /// The number of products in each price band.
    pub bar_chart_data: Vec<PriceRangeCount>,
    /// The number of products in each category.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Get the statistics, bar chart and pie chart for `month`.
///
/// All three parts are computed from a single read of the month's products,
/// so they always describe the same collection even if a seed runs
/// concurrently.
///
/// # Errors
/// Returns [Error::StoreUnavailable] if the store cannot be read.
pub fn combined_data<S>(month: Month, store: &S) -> Result<CombinedData, Error>
where
    S: ProductStore,
{
    let products = store
        .find(&ProductFilter::for_month(month), None)
        .inspect_err(|error| tracing::error!("could not get products for {month}: {error}"))?;

    Ok(CombinedData {
        monthly_statistics_data: summarize_sales(&products),
        bar_chart_data: count_by_price_band(&products),
        pie_chart_data: count_by_category(&products),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use time::{Month, macros::datetime};

    use crate::{
        Error,
        dashboard::{
            charts::{bar_chart_data, pie_chart_data},
            combined::combined_data,
            statistics::monthly_statistics,
        },
        pagination::PageWindow,
        product::{
            CategoryCount, NewProduct, Product, ProductFilter, ProductStore, SQLiteProductStore,
        },
        test_utils::{UnavailableStore, get_test_store},
    };

    /// Counts the reads made through it.
    struct CountingStore {
        inner: SQLiteProductStore,
        reads: AtomicUsize,
    }

    impl ProductStore for CountingStore {
        fn find(
            &self,
            filter: &ProductFilter,
            window: Option<PageWindow>,
        ) -> Result<Vec<Product>, Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.find(filter, window)
        }

        fn count(&self, filter: &ProductFilter) -> Result<u64, Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.count(filter)
        }

        fn count_by_category(&self, filter: &ProductFilter) -> Result<Vec<CategoryCount>, Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.count_by_category(filter)
        }

        fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, Error> {
            self.inner.replace_all(products)
        }
    }

    #[test]
    fn merges_all_parts() {
        let store = get_test_store();
        let date = datetime!(2021-09-02 14:00 UTC);
        store
            .replace_all(vec![
                Product::build("Sold cheap", 50.0, date)
                    .category("electronics")
                    .sold(true),
                Product::build("Sold mid", 150.0, date)
                    .category("electronics")
                    .sold(true),
                Product::build("Unsold", 999.0, date).category("jewelery"),
            ])
            .unwrap();

        let got = combined_data(Month::September, &store).unwrap();

        assert_eq!(got.monthly_statistics_data.total_sale_amount, 200.0);
        assert_eq!(got.monthly_statistics_data.total_sold_items, 2);
        assert_eq!(got.monthly_statistics_data.total_not_sold_items, 1);
        assert_eq!(got.bar_chart_data.len(), 10);
        assert_eq!(
            got.bar_chart_data
                .iter()
                .map(|bucket| bucket.count)
                .sum::<u64>(),
            3
        );
        assert_eq!(got.pie_chart_data.len(), 2);
    }

    #[test]
    fn reads_the_store_once_and_matches_the_separate_parts() {
        let store = CountingStore {
            inner: get_test_store(),
            reads: AtomicUsize::new(0),
        };
        let date = datetime!(2021-09-02 14:00 UTC);
        store
            .replace_all(vec![
                Product::build("Drive", 64.0, date).category("electronics").sold(true),
                Product::build("Ring", 168.0, date).category("jewelery"),
                Product::build("Shirt", 22.3, date).category("men's clothing").sold(true),
                Product::build("Other month", 5.0, datetime!(2021-10-02 14:00 UTC)),
            ])
            .unwrap();

        let got = combined_data(Month::September, &store).unwrap();

        assert_eq!(store.reads.load(Ordering::SeqCst), 1);
        assert_eq!(
            got.monthly_statistics_data,
            monthly_statistics(Month::September, &store.inner).unwrap()
        );
        assert_eq!(
            got.bar_chart_data,
            bar_chart_data(Month::September, &store.inner).unwrap()
        );
        assert_eq!(
            got.pie_chart_data,
            pie_chart_data(Month::September, &store.inner).unwrap()
        );
    }

    #[test]
    fn fails_when_store_is_unavailable() {
        let got = combined_data(Month::September, &UnavailableStore);

        assert!(matches!(got, Err(Error::StoreUnavailable(_))));
    }
}
