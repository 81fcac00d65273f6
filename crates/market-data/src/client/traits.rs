//! Transport trait between the orchestrator and the backend API.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Interval, Period, PricePoint, StockSnapshot, SymbolMatch};

/// Network surface of the stock dashboard backend.
///
/// [`StockApiClient`](crate::client::StockApiClient) is the production
/// implementation; tests substitute an in-memory double so they can
/// count calls and inspect the symbol sets that actually went out.
#[async_trait]
pub trait MarketDataTransport: Send + Sync {
    /// Batched comparison fetch: one call for the whole symbol list.
    async fn compare(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> Result<Vec<StockSnapshot>, FetchError>;

    /// Chart series for a single symbol.
    async fn history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PricePoint>, FetchError>;

    /// Real-time quote for a single symbol (no chart series).
    async fn quote(&self, symbol: &str) -> Result<StockSnapshot, FetchError>;

    /// Basic company information for a single symbol.
    async fn info(&self, symbol: &str) -> Result<StockSnapshot, FetchError>;

    /// Symbol search by ticker or company name.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, FetchError>;
}
