//! HTTP client for the products endpoint
//!
//! One GET per load: `{api_url}?limit=N[&skip=K]`, body parsed as an
//! [`Envelope`]. The response is all-or-nothing; there is no retry.

use super::product::{Catalog, Envelope};
use crate::config::Config;
use crate::util::random_below;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Errors that can occur while loading the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    Network(String),
    /// Server answered with a non-success status
    Status { status: u16, body: String },
    /// Body was not a valid envelope
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Server returned HTTP {}", status)
                } else {
                    write!(f, "Server returned HTTP {}: {}", status, body)
                }
            }
            Self::Parse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Parameters for a single catalog request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Row-count limit sent to the API
    pub limit: u32,
    /// Offset into the remote catalog (None = from the start)
    pub skip: Option<u64>,
}

impl FetchRequest {
    /// Plain reload from the start of the catalog
    pub fn reload(limit: u32) -> Self {
        Self { limit, skip: None }
    }

    /// Load a random window of the catalog
    ///
    /// `total` is the remote catalog size from a previous response. Without it
    /// there is nothing to randomize against and this is a plain reload.
    pub fn randomized(limit: u32, total: Option<u64>) -> Self {
        match total {
            Some(total) if total > limit as u64 => Self {
                limit,
                skip: Some(random_below(total - limit as u64 + 1)),
            },
            _ => Self::reload(limit),
        }
    }

    /// Query parameters for this request
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(skip) = self.skip {
            query.push(("skip", skip.to_string()));
        }
        query
    }
}

/// Anything that can produce a catalog
///
/// The TUI only sees this trait, so tests can swap in canned data and the
/// loader never knows it isn't talking to the network.
pub trait ProductSource: Send + Sync + 'static {
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<Catalog, FetchError>> + Send;
}

/// reqwest-backed product source
pub struct HttpProductSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpProductSource {
    /// Build a client from configuration
    ///
    /// A `request_timeout_secs` of 0 disables the timeout entirely.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!("Catalog client ready (endpoint: {})", config.api_url);

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch(&self, request: FetchRequest) -> Result<Catalog, FetchError> {
        tracing::debug!(
            "GET {} (limit={}, skip={:?})",
            self.api_url,
            request.limit,
            request.skip
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&request.query())
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: crate::util::truncate_to_width(body.trim(), 120),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body: {}", e)))?;

        let envelope: Envelope =
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

        tracing::debug!("Parsed {} product(s)", envelope.products.len());
        Ok(envelope.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/products", addr)
    }

    fn source_for(url: String) -> HttpProductSource {
        let config = Config {
            api_url: url,
            ..Config::default()
        };
        HttpProductSource::new(&config).unwrap()
    }

    #[test]
    fn test_reload_query() {
        let request = FetchRequest::reload(30);
        assert_eq!(request.query(), vec![("limit", "30".to_string())]);
    }

    #[test]
    fn test_randomized_skip_in_range() {
        for _ in 0..50 {
            let request = FetchRequest::randomized(30, Some(194));
            let skip = request.skip.unwrap();
            assert!(skip <= 164);
        }
        // Catalog smaller than the limit: nothing to randomize
        assert_eq!(
            FetchRequest::randomized(30, Some(20)),
            FetchRequest::reload(30)
        );
        assert_eq!(FetchRequest::randomized(30, None), FetchRequest::reload(30));
    }

    #[tokio::test]
    async fn test_fetch_sends_limit_and_parses_envelope() {
        let router = Router::new().route(
            "/products",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let limit: usize = params["limit"].parse().unwrap();
                let products: Vec<_> = (1..=limit)
                    .map(|id| serde_json::json!({"id": id, "title": format!("Item {}", id)}))
                    .collect();
                axum::Json(serde_json::json!({
                    "products": products,
                    "total": 194,
                    "skip": params.get("skip").cloned().unwrap_or_default().parse::<u64>().unwrap_or(0),
                    "limit": limit,
                }))
            }),
        );
        let source = source_for(serve(router).await);

        let catalog = source
            .fetch(FetchRequest {
                limit: 3,
                skip: Some(12),
            })
            .await
            .unwrap();
        assert_eq!(catalog.products.len(), 3);
        assert_eq!(catalog.products[2].title, "Item 3");
        assert_eq!(catalog.total, Some(194));
        assert_eq!(catalog.skip, 12);
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let router = Router::new().route(
            "/products",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let source = source_for(serve(router).await);

        let err = source.fetch(FetchRequest::reload(10)).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                body: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_reports_parse_error() {
        let router = Router::new().route("/products", get(|| async { "not json" }));
        let source = source_for(serve(router).await);

        let err = source.fetch(FetchRequest::reload(10)).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_reports_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source_for(format!("http://{}/products", addr));
        let err = source.fetch(FetchRequest::reload(10)).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.to_string().starts_with("Network error"));
    }
}
