//! Market-data API client.

use super::MarketData;
use super::types::{DefiSpringIncentives, ProtocolOverview, TokenInfo};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            timeout: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Point the client at another base URL (mock servers, staging).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the request timeout, overriding the whole seconds in the config.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        let timeout = self.timeout.unwrap_or_else(|| self.config.timeout());
        ApiClient::with_timeout(self.config, timeout)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed GET wrapper over the market-data API.
///
/// Stateless apart from the connection pool: no caching and no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let timeout = config.timeout();
        Self::with_timeout(config, timeout)
    }

    fn with_timeout(config: ApiConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::RemoteTransport {
                endpoint: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and decode the body as `T`.
    ///
    /// Failures are logged here and returned unchanged to the caller.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let result = self.get_json(endpoint).await;
        if let Err(e) = &result {
            error!(endpoint, error = %e, "Error fetching from market-data API");
        }
        result
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let transport = |source| Error::RemoteTransport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteRequest {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Protocol overview including per-token TVL balances.
    pub async fn protocol_overview(&self) -> Result<ProtocolOverview> {
        self.fetch("/overview").await
    }

    /// DeFi Spring incentives, the source of pair APRs.
    pub async fn defi_spring_incentives(&self) -> Result<DefiSpringIncentives> {
        self.fetch("/defi-spring-incentives").await
    }

    /// TVL history.
    pub async fn tvl_data(&self) -> Result<serde_json::Value> {
        self.fetch("/overview/tvl").await
    }

    /// Volume history.
    pub async fn volume_data(&self) -> Result<serde_json::Value> {
        self.fetch("/overview/volume").await
    }

    /// Data for a specific pair (e.g. WBTC/USDC).
    pub async fn pair_data(&self, token_a: &str, token_b: &str) -> Result<serde_json::Value> {
        self.fetch(&format!("/pair/{token_a}/{token_b}")).await
    }

    /// Every supported token.
    pub async fn tokens(&self) -> Result<Vec<TokenInfo>> {
        self.fetch("/tokens").await
    }
}

#[async_trait]
impl MarketData for ApiClient {
    async fn protocol_overview(&self) -> Result<ProtocolOverview> {
        ApiClient::protocol_overview(self).await
    }

    async fn defi_spring_incentives(&self) -> Result<DefiSpringIncentives> {
        ApiClient::defi_spring_incentives(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClientBuilder::new()
            .base_url(base_url)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/overview",
                get(|| async {
                    Json(json!({
                        "timestamp": 1735689600,
                        "tvlByToken": [
                            { "token": "0x1", "balance": "1000" },
                            { "token": "0x2", "balance": "2000" }
                        ]
                    }))
                }),
            )
            .route(
                "/defi-spring-incentives",
                get(|| async {
                    Json(json!({
                        "strkPrice": 0.15,
                        "totalStrk": 500000,
                        "pairs": []
                    }))
                }),
            )
            .route(
                "/pair/:a/:b",
                get(|Path((a, b)): Path<(String, String)>| async move {
                    Json(json!({ "token0": a, "token1": b }))
                }),
            )
            .route(
                "/overview/volume",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            )
            .route("/tokens", get(|| async { "not json" }))
    }

    #[tokio::test]
    async fn test_fetches_typed_endpoints() {
        let base = serve(router()).await;
        let api = client(&base);

        let overview = api.protocol_overview().await.unwrap();
        assert_eq!(overview.timestamp, 1735689600);
        assert_eq!(overview.tvl_by_token.len(), 2);

        let incentives = api.defi_spring_incentives().await.unwrap();
        assert_eq!(incentives.strk_price, dec!(0.15));
        assert!(incentives.pairs.is_empty());
    }

    #[tokio::test]
    async fn test_pair_path_is_built_from_tokens() {
        let base = serve(router()).await;
        let pair = client(&base).pair_data("WBTC", "USDC").await.unwrap();
        assert_eq!(pair, json!({ "token0": "WBTC", "token1": "USDC" }));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let base = serve(router()).await;
        let api = client(&format!("{base}/"));
        assert_eq!(api.base_url(), base);
        assert!(api.protocol_overview().await.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_error() {
        let base = serve(router()).await;
        let err = client(&base).volume_data().await.unwrap_err();
        assert!(matches!(
            err,
            Error::RemoteRequest { status: 503, ref endpoint } if endpoint == "/overview/volume"
        ));
    }

    #[tokio::test]
    async fn test_unknown_route_is_request_error() {
        let base = serve(router()).await;
        let err = client(&base).tvl_data().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_bad_body_is_decode_error() {
        let base = serve(router()).await;
        let err = client(&base).tokens().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .protocol_overview()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteTransport { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_sub_second_timeout_is_kept() {
        let slow = Router::new().route(
            "/overview",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "timestamp": 0, "tvlByToken": [] }))
            }),
        );
        let base = serve(slow).await;
        let client = ApiClientBuilder::new()
            .base_url(&base)
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        let started = std::time::Instant::now();
        let err = client.protocol_overview().await.unwrap_err();
        assert!(matches!(err, Error::RemoteTransport { .. }));
        assert!(started.elapsed() < Duration::from_millis(900));
    }
}
