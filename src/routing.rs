//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    dashboard::{get_bar_chart, get_combined_data, get_pie_chart, get_statistics},
    endpoints,
    product::{ProductStore, get_transactions},
    seed::{SeedSource, initialize_database},
};

/// Return a router with all the app's routes.
pub fn build_router<S, U>(state: AppState<S, U>) -> Router
where
    S: ProductStore + Clone + Send + Sync + 'static,
    U: SeedSource + 'static,
{
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::INITIALIZE_DATABASE,
            get(initialize_database::<S, U>).post(initialize_database::<S, U>),
        )
        .route(endpoints::TRANSACTIONS, get(get_transactions::<S>))
        .route(endpoints::STATISTICS, get(get_statistics::<S>))
        .route(endpoints::BAR_CHART, get(get_bar_chart::<S>))
        .route(endpoints::PIE_CHART, get(get_pie_chart::<S>))
        .route(endpoints::COMBINED_DATA, get(get_combined_data::<S>))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> &'static str {
    "OK"
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not found" })),
    )
        .into_response()
}
