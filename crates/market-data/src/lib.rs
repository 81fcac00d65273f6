//! Tickerlens Market Data Crate
//!
//! Client-side data layer for the Tickerlens comparison dashboard:
//! a time-expiring snapshot cache plus a fetch orchestrator that
//! coalesces a multi-symbol request into at most one network call.
//!
//! # Overview
//!
//! The crate supports:
//! - Per-(symbol, period) snapshot caching with a fixed TTL
//! - Batched comparison fetches that only request cache misses
//! - Deadline-guarded network calls that abort on timeout
//! - Out-of-order write protection for overlapping fetches
//! - A drop-gate for rapid period changes
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +--------------------+
//! |   UI consumer    | --> | MarketDataService  |  (orchestrator)
//! +------------------+     +--------------------+
//!                             |              |
//!                   cache hits|              |cache misses
//!                             v              v
//!                  +----------------+   +--------------------+
//!                  | StockDataCache |   | MarketDataTransport|
//!                  +----------------+   +--------------------+
//!                                             |
//!                                             v
//!                                       +----------------+
//!                                       | StockApiClient |  (HTTP backend)
//!                                       +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataService`] - fetch orchestrator, the public entry point
//! - [`StockDataCache`] - shared snapshot cache with TTL
//! - [`StockApiClient`] - reqwest client for the dashboard backend
//! - [`StockSnapshot`] / [`PricePoint`] - comparison payloads
//! - [`Period`] / [`Interval`] - chart range and sampling resolution
//! - [`FetchError`] / [`Recovery`] - failure taxonomy and UI reaction

pub mod cache;
pub mod client;
pub mod errors;
pub mod models;
pub mod service;

// Re-export the cache types
pub use cache::{CacheStats, StockDataCache, WriteTicket, DEFAULT_TTL};

// Re-export the client types
pub use client::{ClientConfig, MarketDataTransport, StockApiClient, DEFAULT_BASE_URL};

// Re-export the error types
pub use errors::{FetchError, Recovery};

// Re-export all public types from models
pub use models::{
    CompareRequest, Interval, InvalidInterval, InvalidPeriod, Period, PricePoint, StockSnapshot,
    SymbolMatch,
};

// Re-export the service types
pub use service::{
    MarketDataService, RefreshGate, RefreshPermit, FETCH_TIMEOUT, MAX_COMPARE_SYMBOLS,
};
