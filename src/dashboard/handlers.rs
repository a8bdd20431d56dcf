//! Dashboard HTTP handlers.
//!
//! Each handler resolves the `month` query parameter and returns one of the
//! monthly aggregates as JSON.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    dashboard::{
        charts::{PriceRangeCount, bar_chart_data, pie_chart_data},
        combined::{CombinedData, combined_data},
        statistics::{MonthlyStatistics, monthly_statistics},
    },
    product::{CategoryCount, ProductStore, resolve_month, resolve_numeric_month},
};

/// The state needed for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState<S> {
    /// The store to read products from.
    pub store: S,
}

impl<S, U> FromRef<AppState<S, U>> for DashboardState<S>
where
    S: Clone,
{
    fn from_ref(state: &AppState<S, U>) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The query parameters shared by the dashboard endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// A month name or number.
    pub month: Option<String>,
}

/// Resolve a month name or number, treating an empty value as missing.
fn require_month(month: Option<&str>) -> Result<Month, Error> {
    match month.map(str::trim) {
        None | Some("") => Err(Error::MissingMonth),
        Some(month) => resolve_month(month),
    }
}

/// Get the sale totals for a month.
pub async fn get_statistics<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlyStatistics>, Error>
where
    S: ProductStore,
{
    let month = require_month(query.month.as_deref())?;

    monthly_statistics(month, &state.store).map(Json)
}

/// Get the number of products in each price band for a month.
pub async fn get_bar_chart<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error>
where
    S: ProductStore,
{
    let month = require_month(query.month.as_deref())?;

    bar_chart_data(month, &state.store).map(Json)
}

/// Get the number of products in each category for a month.
pub async fn get_pie_chart<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    S: ProductStore,
{
    let month = require_month(query.month.as_deref())?;

    pie_chart_data(month, &state.store).map(Json)
}

/// Get the statistics and both charts for a month in one response.
///
/// Unlike the other dashboard endpoints the month must be given as a number
/// from 1 to 12.
pub async fn get_combined_data<S>(
    State(state): State<DashboardState<S>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedData>, Error>
where
    S: ProductStore,
{
    let month = match query.month.as_deref() {
        Some(month) => resolve_numeric_month(month)?,
        None => return Err(Error::InvalidMonth(String::new())),
    };

    combined_data(month, &state.store).map(Json)
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{Error, dashboard::handlers::require_month};

    #[test]
    fn require_month_accepts_names_and_numbers() {
        assert_eq!(require_month(Some("3")), Ok(Month::March));
        assert_eq!(require_month(Some("march")), Ok(Month::March));
    }

    #[test]
    fn require_month_rejects_missing_month() {
        assert_eq!(require_month(None), Err(Error::MissingMonth));
        assert_eq!(require_month(Some("")), Err(Error::MissingMonth));
        assert_eq!(require_month(Some("  ")), Err(Error::MissingMonth));
    }

    #[test]
    fn require_month_rejects_unknown_month() {
        assert!(matches!(
            require_month(Some("Smarch")),
            Err(Error::InvalidMonth(_))
        ));
    }
}
