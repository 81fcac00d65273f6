//! Fetch orchestration over the snapshot cache and the backend transport.
//!
//! The orchestrator minimizes network traffic by answering from the
//! cache where it can and issuing exactly one batched request for the
//! symbols it cannot. A comparison request flows through these steps:
//!
//! 1. Normalize the symbol list (trim, uppercase, drop blanks).
//! 2. Partition into cache hits and misses.
//! 3. Misses, if any, go out as one batched fetch raced against a
//!    deadline; losing the race aborts the in-flight request.
//! 4. Fresh results are written back under tickets reserved before the
//!    fetch started, so a slow response can never overwrite newer data.
//! 5. Hits and fresh results are merged and re-ordered to the caller's
//!    input order.

mod gate;

pub use gate::{RefreshGate, RefreshPermit};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::timeout;

use crate::cache::{CacheStats, StockDataCache, WriteTicket};
use crate::client::MarketDataTransport;
use crate::errors::FetchError;
use crate::models::{Interval, Period, PricePoint, StockSnapshot, SymbolMatch};

/// The backend rejects comparison requests beyond this many symbols.
pub const MAX_COMPARE_SYMBOLS: usize = 5;

/// Deadline for one batched comparison fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Coalescing fetch service for the comparison dashboard.
///
/// Owns nothing global: both the transport and the cache are injected,
/// so tests run against an in-memory transport and a fresh cache.
pub struct MarketDataService {
    transport: Arc<dyn MarketDataTransport>,
    cache: Arc<StockDataCache>,
    fetch_timeout: Duration,
    period_change_gate: RefreshGate,
}

impl MarketDataService {
    /// Create a service over the given transport and cache.
    pub fn new(transport: Arc<dyn MarketDataTransport>, cache: Arc<StockDataCache>) -> Self {
        Self {
            transport,
            cache,
            fetch_timeout: FETCH_TIMEOUT,
            period_change_gate: RefreshGate::new(),
        }
    }

    /// Override the batched-fetch deadline.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Fetch comparison data for a set of symbols at one period.
    ///
    /// Symbols with a fresh cache entry are served from the cache; the
    /// rest are fetched in a single batched call. The returned list
    /// follows the caller's input order. Duplicate symbols are the
    /// caller's problem: they are neither collapsed nor rejected.
    pub async fn fetch_comparison_data(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> Result<Vec<StockSnapshot>, FetchError> {
        let requested = normalize_symbols(symbols);

        if requested.is_empty() {
            return Err(FetchError::EmptyRequest);
        }
        if requested.len() > MAX_COMPARE_SYMBOLS {
            return Err(FetchError::TooManySymbols {
                requested: requested.len(),
                limit: MAX_COMPARE_SYMBOLS,
            });
        }

        let (cached, missing): (Vec<String>, Vec<String>) = requested
            .iter()
            .cloned()
            .partition(|symbol| self.cache.is_fresh(symbol, period));

        if missing.is_empty() {
            debug!(
                "serving {} symbols at {} entirely from cache",
                cached.len(),
                period
            );
            let hits = self.cache.fresh_many(&cached, period);
            return Ok(reorder_to_input(&requested, hits));
        }

        // Tickets are reserved before the request goes out; a response
        // that straggles in after a newer fetch loses at write time.
        let tickets: HashMap<String, WriteTicket> = missing
            .iter()
            .map(|symbol| (symbol.clone(), self.cache.begin_write()))
            .collect();

        info!(
            "fetching {} of {} symbols at {} ({} served from cache)",
            missing.len(),
            requested.len(),
            period,
            cached.len()
        );

        let fetched = match timeout(
            self.fetch_timeout,
            self.transport.compare(&missing, period, interval),
        )
        .await
        {
            Ok(result) => result?,
            // Losing the race drops the transport future, which aborts
            // the in-flight request rather than leaking it.
            Err(_) => {
                warn!("batched fetch for {} symbols timed out", missing.len());
                return Err(FetchError::RequestTimeout);
            }
        };

        if fetched.is_empty() {
            return Err(FetchError::NoData);
        }

        for snapshot in &fetched {
            let ticket = tickets
                .get(&snapshot.symbol.to_uppercase())
                .copied()
                .unwrap_or_else(|| self.cache.begin_write());

            if !self.cache.store_with(period, snapshot.clone(), ticket) {
                warn!(
                    "newer data for {} at {} already cached; response not stored",
                    snapshot.symbol, period
                );
            }
        }

        let mut merged = self.cache.fresh_many(&cached, period);
        merged.extend(fetched);
        Ok(reorder_to_input(&requested, merged))
    }

    /// Comparison fetch triggered by a period change in the UI.
    ///
    /// While one period-change fetch is in flight, further ones are
    /// dropped (`Ok(None)`), not queued. The gate is released however
    /// the in-flight fetch ends, including errors and timeouts. The
    /// plain [`fetch_comparison_data`](Self::fetch_comparison_data)
    /// entry point is not gated.
    pub async fn fetch_on_period_change(
        &self,
        symbols: &[String],
        period: Period,
        interval: Interval,
    ) -> Result<Option<Vec<StockSnapshot>>, FetchError> {
        let _permit = match self.period_change_gate.try_begin() {
            Some(permit) => permit,
            None => {
                debug!(
                    "period change to {} dropped; another refresh is in flight",
                    period
                );
                return Ok(None);
            }
        };

        let data = self
            .fetch_comparison_data(symbols, period, interval)
            .await?;
        Ok(Some(data))
    }

    /// Whether a period-change fetch is currently in flight.
    pub fn period_change_in_flight(&self) -> bool {
        self.period_change_gate.is_busy()
    }

    /// Chart series for one symbol. Uncached pass-through.
    pub async fn get_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let symbol = normalize_symbol(symbol)?;
        self.transport.history(&symbol, period, interval).await
    }

    /// Real-time quote for one symbol. Uncached pass-through.
    pub async fn get_quote(&self, symbol: &str) -> Result<StockSnapshot, FetchError> {
        let symbol = normalize_symbol(symbol)?;
        self.transport.quote(&symbol).await
    }

    /// Company information for one symbol. Uncached pass-through.
    pub async fn get_stock_info(&self, symbol: &str) -> Result<StockSnapshot, FetchError> {
        let symbol = normalize_symbol(symbol)?;
        self.transport.info(&symbol).await
    }

    /// Symbol search by ticker or company name. Uncached pass-through.
    pub async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolMatch>, FetchError> {
        self.transport.search(query).await
    }

    /// Whether a fresh cache entry exists for the symbol and period.
    pub fn is_data_cached(&self, symbol: &str, period: Period) -> bool {
        self.cache.is_fresh(symbol, period)
    }

    /// Diagnostic cache counters for display.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// Trim, uppercase, and drop blank symbols. Order is preserved and
/// duplicates are kept.
fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    symbols
        .iter()
        .map(|symbol| symbol.trim().to_uppercase())
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

fn normalize_symbol(symbol: &str) -> Result<String, FetchError> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        Err(FetchError::EmptyRequest)
    } else {
        Ok(symbol)
    }
}

/// Re-order results to the position of each symbol in the normalized
/// input. Symbols the backend skipped are simply absent; anything
/// unexpected sorts to the end.
fn reorder_to_input(requested: &[String], mut results: Vec<StockSnapshot>) -> Vec<StockSnapshot> {
    let rank: HashMap<&str, usize> = requested
        .iter()
        .enumerate()
        .map(|(position, symbol)| (symbol.as_str(), position))
        .collect();

    results.sort_by_key(|snapshot| {
        let symbol = snapshot.symbol.to_uppercase();
        rank.get(symbol.as_str()).copied().unwrap_or(usize::MAX)
    });
    results
}
