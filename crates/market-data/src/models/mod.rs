//! Wire and domain models for the stock dashboard backend.

mod period;
mod search;
mod snapshot;

pub use period::{Interval, InvalidInterval, InvalidPeriod, Period};
pub use search::SymbolMatch;
pub use snapshot::{CompareRequest, PricePoint, StockSnapshot};
