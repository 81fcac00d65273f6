use serde::{Deserialize, Serialize};

/// One row of a symbol search result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Ticker symbol
    pub symbol: String,

    /// Company name
    pub name: String,
}
