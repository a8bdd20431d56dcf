//! Product transactions is a small JSON API over a collection of product sale
//! records.
//!
//! The collection is seeded wholesale from an upstream JSON feed and exposed
//! as a paginated, searchable transaction listing, monthly sale statistics,
//! price band and category chart data, and a combined dashboard payload.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod logging;
mod pagination;
mod product;
mod routing;
mod seed;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{CombinedData, MonthlyStatistics, PriceRangeCount};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use product::{
    CategoryCount, NewProduct, Product, ProductFilter, ProductStore, SQLiteProductStore,
    SearchTerm, TransactionsPage, TransactionsQuery,
};
pub use routing::build_router;
pub use seed::{
    DEFAULT_SEED_URL, HttpSeedSource, SeedResponse, SeedSource, Seeder, UpstreamProduct,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month could not be read as either an English month name or a
    /// number from 1 to 12.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// An endpoint that is scoped to a month was called without one.
    #[error("Month parameter is required")]
    MissingMonth,

    /// The page number or page size was not a positive integer, or the page
    /// size was larger than the configured maximum.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The upstream seed feed could not be fetched or decoded.
    #[error("could not fetch seed data: {0}")]
    SeedSourceUnavailable(String),

    /// A record in the upstream seed feed failed validation.
    ///
    /// The store is left untouched when this error occurs.
    #[error("invalid seed data: {0}")]
    InvalidSeedData(String),

    /// The store could not be replaced with the seed data.
    #[error("could not write seed data: {0}")]
    SeedWriteFailed(String),

    /// An unhandled/unexpected error from the database, including a poisoned
    /// connection lock.
    #[error("the product store is unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StoreUnavailable(value.to_string())
    }
}

impl Error {
    /// The HTTP status code that the error maps to.
    ///
    /// Client input errors are a 400, everything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::MissingMonth | Error::InvalidPagination(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(
            Error::InvalidMonth("Smarch".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::MissingMonth.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::InvalidPagination("page must be at least 1".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn other_errors_are_internal_server_errors() {
        let errors = [
            Error::SeedSourceUnavailable("timed out".to_owned()),
            Error::InvalidSeedData("record 3".to_owned()),
            Error::SeedWriteFailed("disk full".to_owned()),
            Error::StoreUnavailable("locked".to_owned()),
        ];

        for error in errors {
            assert_eq!(
                error.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }

    #[test]
    fn sql_errors_become_store_unavailable() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert!(matches!(error, Error::StoreUnavailable(_)));
    }
}
