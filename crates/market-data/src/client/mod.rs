//! HTTP client for the stock dashboard backend.
//!
//! Thin `reqwest` wrappers over the backend's REST endpoints:
//!
//! - Batched comparison: `POST {base}/stocks/compare`
//! - Chart history: `GET {base}/stock/history/{symbol}?period=&interval=`
//! - Quote / info: `GET {base}/stock/quote/{symbol}`, `GET {base}/stock/info/{symbol}`
//! - Search: `GET {base}/stocks/search?q=`
//!
//! All requests share one configured base URL and request timeout.

mod traits;

pub use traits::MarketDataTransport;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::FetchError;
use crate::models::{CompareRequest, Interval, Period, PricePoint, StockSnapshot, SymbolMatch};

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "TICKERLENS_API_URL";

/// Per-request timeout applied at the HTTP client level.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The backend rejects search queries shorter than this.
const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Connection settings for [`StockApiClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default configuration with the base URL taken from
    /// [`BASE_URL_ENV`] when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        config
    }
}

/// Client for the stock dashboard backend.
#[derive(Clone)]
pub struct StockApiClient {
    client: Client,
    base_url: String,
}

impl StockApiClient {
    /// Create a client with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with explicit connection settings.
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl Default for StockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope of the history endpoint.
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    data: Vec<PricePoint>,
}

#[async_trait]
impl MarketDataTransport for StockApiClient {
    async fn compare(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> Result<Vec<StockSnapshot>, FetchError> {
        let url = format!("{}/stocks/compare", self.base_url);
        let body = CompareRequest {
            symbols: symbols.to_vec(),
            period,
            interval,
        };

        debug!("POST {} for {} symbols", url, symbols.len());
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        Ok(response.json::<Vec<StockSnapshot>>().await?)
    }

    async fn history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let url = format!(
            "{}/stock/history/{}?period={}&interval={}",
            self.base_url, symbol, period, interval
        );

        let response: HistoryResponse = self.get_json(&url).await?;
        Ok(response.data)
    }

    async fn quote(&self, symbol: &str) -> Result<StockSnapshot, FetchError> {
        let url = format!("{}/stock/quote/{}", self.base_url, symbol);
        self.get_json(&url).await
    }

    async fn info(&self, symbol: &str) -> Result<StockSnapshot, FetchError> {
        let url = format!("{}/stock/info/{}", self.base_url, symbol);
        self.get_json(&url).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, FetchError> {
        let query = query.trim();
        if query.len() < MIN_SEARCH_QUERY_LEN {
            return Err(FetchError::EmptyRequest);
        }

        let url = format!(
            "{}/stocks/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get_json(&url).await
    }
}
