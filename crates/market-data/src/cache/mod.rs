//! Time-expiring snapshot cache.

mod stock_data_cache;

pub use stock_data_cache::{CacheStats, StockDataCache, WriteTicket, DEFAULT_TTL};
