//! Where seed data comes from.

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The feed the product collection is seeded from unless configured otherwise.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// A product record as it appears in the upstream feed.
///
/// Fields are checked before they are written to the store, see
/// [crate::Seeder::seed]. Fields the store does not keep, such as the
/// upstream `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamProduct {
    /// The name of the product.
    pub title: String,
    /// The listed price.
    pub price: f64,
    /// A longer text description of the product, missing or null when the
    /// feed has none.
    pub description: Option<String>,
    /// A short label grouping similar products.
    pub category: String,
    /// A URL to an image of the product, missing or null when the feed has
    /// none.
    pub image: Option<String>,
    /// Whether the product has sold.
    pub sold: bool,
    /// An RFC 3339 timestamp of the sale.
    pub date_of_sale: String,
}

/// Fetches the records to seed the store with.
pub trait SeedSource: Send + Sync {
    /// Get every record in the feed.
    ///
    /// # Errors
    /// Returns [Error::SeedSourceUnavailable] if the feed cannot be fetched
    /// or decoded.
    fn fetch(&self) -> impl Future<Output = Result<Vec<UpstreamProduct>, Error>> + Send;
}

/// Fetches seed records over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedSource {
    /// Create a source that fetches from `url`, giving up on a request after
    /// `timeout`.
    ///
    /// # Errors
    /// Returns [Error::SeedSourceUnavailable] if the HTTP client cannot be
    /// built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(source_unavailable)?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<UpstreamProduct>, Error> {
        tracing::debug!("fetching seed data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(source_unavailable)?;

        response
            .json::<Vec<UpstreamProduct>>()
            .await
            .map_err(source_unavailable)
    }
}

fn source_unavailable(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        tracing::error!("timed out fetching seed data: {error}");
    } else {
        tracing::error!("could not fetch seed data: {error}");
    }

    Error::SeedSourceUnavailable(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::{
        Error,
        seed::source::{HttpSeedSource, SeedSource, UpstreamProduct},
    };

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        format!("http://{address}/feed.json")
    }

    #[test]
    fn upstream_record_ignores_unknown_fields() {
        let record: UpstreamProduct = serde_json::from_value(json!({
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }))
        .unwrap();

        assert_eq!(record.title, "Fjallraven Backpack");
        assert_eq!(record.date_of_sale, "2021-11-27T20:29:54+05:30");
    }

    #[test]
    fn upstream_record_accepts_null_text_fields() {
        let record: UpstreamProduct = serde_json::from_value(json!({
            "title": "Ring",
            "price": 9.99,
            "description": null,
            "category": "jewelery",
            "image": null,
            "sold": true,
            "dateOfSale": "2022-03-15T08:30:00Z"
        }))
        .unwrap();

        assert_eq!(record.description, None);
        assert_eq!(record.image, None);
    }

    #[tokio::test]
    async fn fetches_records_from_feed() {
        let router = Router::new().route(
            "/feed.json",
            get(|| async {
                Json(json!([{
                    "title": "Ring",
                    "price": 9.99,
                    "category": "jewelery",
                    "sold": true,
                    "dateOfSale": "2022-03-15T08:30:00Z"
                }]))
            }),
        );
        let url = serve(router).await;
        let source = HttpSeedSource::new(&url, Duration::from_secs(5)).unwrap();

        let got = source.fetch().await.unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].title, "Ring");
        assert_eq!(got[0].description, None);
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let router = Router::new().route("/feed.json", get(|| async { StatusCode::NOT_FOUND }));
        let url = serve(router).await;
        let source = HttpSeedSource::new(&url, Duration::from_secs(5)).unwrap();

        let got = source.fetch().await;

        assert!(matches!(got, Err(Error::SeedSourceUnavailable(_))));
    }

    #[tokio::test]
    async fn slow_feed_times_out() {
        let router = Router::new().route(
            "/feed.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        );
        let url = serve(router).await;
        let source = HttpSeedSource::new(&url, Duration::from_millis(200)).unwrap();

        let got = tokio::time::timeout(Duration::from_secs(2), source.fetch())
            .await
            .expect("the fetch should give up before the feed responds");

        assert!(matches!(got, Err(Error::SeedSourceUnavailable(_))));
    }

    #[tokio::test]
    async fn malformed_feed_is_unavailable() {
        let router = Router::new().route("/feed.json", get(|| async { "not json" }));
        let url = serve(router).await;
        let source = HttpSeedSource::new(&url, Duration::from_secs(5)).unwrap();

        let got = source.fetch().await;

        assert!(matches!(got, Err(Error::SeedSourceUnavailable(_))));
    }
}
