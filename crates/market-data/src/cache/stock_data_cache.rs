//! In-memory snapshot cache keyed by symbol and period.
//!
//! Entries go stale after a fixed time-to-live and are then treated as
//! misses on every read path; nothing is handed out stale. Writes carry a
//! monotonic ticket so that when two fetches for the same key overlap,
//! the response from the older fetch can never overwrite the newer one.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;

use crate::models::{Period, StockSnapshot};

/// How long a stored snapshot counts as fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Ordering ticket for a cache write.
///
/// Take a ticket with [`StockDataCache::begin_write`] *before* starting
/// the fetch whose result it will store; apply the result with
/// [`StockDataCache::store_with`]. Tickets are totally ordered, so
/// responses apply in the order their fetches began no matter how they
/// interleave on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct WriteTicket(u64);

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct CacheKey {
    symbol: String,
    period: Period,
}

impl CacheKey {
    fn new(symbol: &str, period: Period) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            period,
        }
    }
}

struct CacheEntry {
    snapshot: StockSnapshot,
    stored_at: Instant,
    seq: u64,
}

/// Diagnostic counters for the cache (for display only).
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Number of stored entries, fresh or stale
    pub entries: usize,

    /// Distinct symbols with at least one entry, sorted
    pub symbols: Vec<String>,
}

/// Concurrent snapshot store with time-based staleness.
///
/// Construct one per application and share it via `Arc`; every consumer
/// sees the same entries. All reads fold the staleness check in, so a
/// stale entry behaves exactly like one that was never stored.
pub struct StockDataCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
    write_seq: AtomicU64,
}

impl StockDataCache {
    /// Create a cache with the default five-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            write_seq: AtomicU64::new(0),
        }
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Reserve an ordering ticket for an upcoming write.
    pub fn begin_write(&self) -> WriteTicket {
        WriteTicket(self.write_seq.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Store a snapshot under a previously reserved ticket.
    ///
    /// The write is applied only if no write with a newer ticket has
    /// already landed on the same key. Returns whether it was applied.
    /// An applied write fully replaces the entry and restarts its TTL.
    pub fn store_with(&self, period: Period, snapshot: StockSnapshot, ticket: WriteTicket) -> bool {
        let key = CacheKey::new(&snapshot.symbol, period);

        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if ticket.0 >= occupied.get().seq {
                    occupied.insert(CacheEntry {
                        snapshot,
                        stored_at: Instant::now(),
                        seq: ticket.0,
                    });
                    true
                } else {
                    debug!(
                        "discarding out-of-order write for {} at {}",
                        occupied.key().symbol,
                        occupied.key().period
                    );
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry {
                    snapshot,
                    stored_at: Instant::now(),
                    seq: ticket.0,
                });
                true
            }
        }
    }

    /// Store a snapshot immediately, as the newest write for its key.
    pub fn store(&self, period: Period, snapshot: StockSnapshot) {
        let ticket = self.begin_write();
        self.store_with(period, snapshot, ticket);
    }

    /// Fetch the snapshot for a symbol/period if a fresh entry exists.
    ///
    /// Stale entries read as misses; they are left in place for the next
    /// write (or [`clear_expired`](Self::clear_expired)) to replace.
    pub fn fresh(&self, symbol: &str, period: Period) -> Option<StockSnapshot> {
        let key = CacheKey::new(symbol, period);
        let entry = self.entries.get(&key)?;

        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.snapshot.clone())
        } else {
            None
        }
    }

    /// Whether a fresh entry exists for the symbol/period.
    ///
    /// "Never stored" and "stored but expired" are indistinguishable here.
    pub fn is_fresh(&self, symbol: &str, period: Period) -> bool {
        let key = CacheKey::new(symbol, period);
        self.entries
            .get(&key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// Fetch fresh snapshots for several symbols at once.
    ///
    /// Symbols without a fresh entry are silently dropped; the returned
    /// list follows the order of `symbols` for the ones found.
    pub fn fresh_many(&self, symbols: &[String], period: Period) -> Vec<StockSnapshot> {
        symbols
            .iter()
            .filter_map(|symbol| self.fresh(symbol, period))
            .collect()
    }

    /// Whether every listed symbol has a fresh entry for the period.
    pub fn has_all_fresh(&self, symbols: &[String], period: Period) -> bool {
        symbols.iter().all(|symbol| self.is_fresh(symbol, period))
    }

    /// Sweep out entries whose age has reached the TTL.
    pub fn clear_expired(&self) {
        self.entries
            .retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
    }

    /// Empty the store.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostic snapshot of the cache contents.
    pub fn stats(&self) -> CacheStats {
        let symbols: BTreeSet<String> = self
            .entries
            .iter()
            .map(|entry| entry.key().symbol.clone())
            .collect();

        CacheStats {
            entries: self.entries.len(),
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl Default for StockDataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn snapshot(symbol: &str, price: Decimal) -> StockSnapshot {
        StockSnapshot::new(symbol, format!("{symbol} Inc."), price)
    }

    #[test]
    fn test_store_and_fresh() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));

        let found = cache.fresh("AAPL", Period::OneMonth).unwrap();
        assert_eq!(found.symbol, "AAPL");
        assert_eq!(found.price, dec!(189.84));
    }

    #[test]
    fn test_miss_for_unknown_symbol() {
        let cache = StockDataCache::new();
        assert!(cache.fresh("NONEXISTENT", Period::OneMonth).is_none());
        assert!(!cache.is_fresh("NONEXISTENT", Period::OneMonth));
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        let cache = StockDataCache::new();
        cache.store(Period::OneYear, snapshot("AAPL", dec!(189.84)));

        assert!(cache.is_fresh("aapl", Period::OneYear));
        assert!(cache.is_fresh(" aapl ", Period::OneYear));
    }

    #[test]
    fn test_periods_are_separate_keys() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));

        assert!(cache.is_fresh("AAPL", Period::OneMonth));
        assert!(!cache.is_fresh("AAPL", Period::OneYear));
    }

    #[test]
    fn test_entry_goes_stale_at_ttl() {
        let ttl = Duration::from_secs(300);
        let cache = StockDataCache::with_ttl(ttl);
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));

        let key = CacheKey::new("AAPL", Period::OneMonth);

        // Just inside the window: still fresh
        cache.entries.get_mut(&key).unwrap().stored_at =
            Instant::now() - (ttl - Duration::from_secs(1));
        assert!(cache.is_fresh("AAPL", Period::OneMonth));

        // At exactly the TTL: already a miss
        cache.entries.get_mut(&key).unwrap().stored_at = Instant::now() - ttl;
        assert!(!cache.is_fresh("AAPL", Period::OneMonth));
        assert!(cache.fresh("AAPL", Period::OneMonth).is_none());

        // The stale entry is not evicted by reads
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_store_replaces_without_merging() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(100)));
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(200)));

        let found = cache.fresh("AAPL", Period::OneMonth).unwrap();
        assert_eq!(found.price, dec!(200));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_refetch_restarts_ttl() {
        let ttl = Duration::from_secs(300);
        let cache = StockDataCache::with_ttl(ttl);
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(100)));

        let key = CacheKey::new("AAPL", Period::OneMonth);
        cache.entries.get_mut(&key).unwrap().stored_at = Instant::now() - ttl;
        assert!(!cache.is_fresh("AAPL", Period::OneMonth));

        cache.store(Period::OneMonth, snapshot("AAPL", dec!(101)));
        assert!(cache.is_fresh("AAPL", Period::OneMonth));
    }

    #[test]
    fn test_out_of_order_write_is_discarded() {
        let cache = StockDataCache::new();

        let older = cache.begin_write();
        let newer = cache.begin_write();

        assert!(cache.store_with(Period::OneMonth, snapshot("AAPL", dec!(200)), newer));
        assert!(!cache.store_with(Period::OneMonth, snapshot("AAPL", dec!(100)), older));

        let found = cache.fresh("AAPL", Period::OneMonth).unwrap();
        assert_eq!(found.price, dec!(200));
    }

    #[test]
    fn test_same_ticket_restore_is_applied() {
        let cache = StockDataCache::new();
        let ticket = cache.begin_write();

        assert!(cache.store_with(Period::OneMonth, snapshot("AAPL", dec!(100)), ticket));
        assert!(cache.store_with(Period::OneMonth, snapshot("AAPL", dec!(101)), ticket));

        let found = cache.fresh("AAPL", Period::OneMonth).unwrap();
        assert_eq!(found.price, dec!(101));
    }

    #[test]
    fn test_fresh_many_drops_missing_and_keeps_input_order() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("MSFT", dec!(411.22)));
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));

        let symbols = vec![
            "AAPL".to_string(),
            "TSLA".to_string(),
            "MSFT".to_string(),
        ];
        let found = cache.fresh_many(&symbols, Period::OneMonth);

        let names: Vec<&str> = found.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(names, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_has_all_fresh() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));

        let just_aapl = vec!["AAPL".to_string()];
        let both = vec!["AAPL".to_string(), "MSFT".to_string()];

        assert!(cache.has_all_fresh(&just_aapl, Period::OneMonth));
        assert!(!cache.has_all_fresh(&both, Period::OneMonth));
    }

    #[test]
    fn test_clear_expired_keeps_fresh_entries() {
        let ttl = Duration::from_secs(300);
        let cache = StockDataCache::with_ttl(ttl);
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));
        cache.store(Period::OneMonth, snapshot("MSFT", dec!(411.22)));

        let key = CacheKey::new("AAPL", Period::OneMonth);
        cache.entries.get_mut(&key).unwrap().stored_at = Instant::now() - ttl;

        cache.clear_expired();

        assert_eq!(cache.len(), 1);
        assert!(cache.is_fresh("MSFT", Period::OneMonth));
    }

    #[test]
    fn test_clear_empties_store() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));
        cache.clear();

        assert!(cache.is_empty());
        assert!(!cache.is_fresh("AAPL", Period::OneMonth));
    }

    #[test]
    fn test_stats_report_distinct_symbols() {
        let cache = StockDataCache::new();
        cache.store(Period::OneMonth, snapshot("AAPL", dec!(189.84)));
        cache.store(Period::OneYear, snapshot("AAPL", dec!(189.84)));
        cache.store(Period::OneMonth, snapshot("MSFT", dec!(411.22)));

        let stats = cache.stats();
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }
}
