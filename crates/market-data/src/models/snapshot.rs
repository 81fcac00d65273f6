use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::{Interval, Period};

/// One chart sample for a symbol.
///
/// `date` is the backend's formatted timestamp: `%Y-%m-%d` for daily
/// sampling, `%Y-%m-%d %H:%M:%S` for intraday intervals. Series arrive
/// chronologically ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Formatted sample timestamp
    pub date: String,

    /// Closing price at this sample
    pub price: Decimal,

    /// Trading volume at this sample
    pub volume: u64,

    /// Opening price (absent in trimmed-down series)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    /// High price (absent in trimmed-down series)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    /// Low price (absent in trimmed-down series)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
}

impl PricePoint {
    /// Create a price point with only the required fields.
    pub fn new(date: impl Into<String>, price: Decimal, volume: u64) -> Self {
        Self {
            date: date.into(),
            price,
            volume,
            open: None,
            high: None,
            low: None,
        }
    }
}

/// Per-symbol payload of a comparison response.
///
/// `volume` and `market_cap` are display strings preformatted by the
/// backend ("12.3M", "2.1T", or "N/A"); the raw counterparts carry the
/// unformatted numbers when the backend has them. `chart_data` is empty
/// on quote/info responses, which omit the series.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    /// Ticker symbol, uppercase
    pub symbol: String,

    /// Company long name
    pub name: String,

    /// Current price
    pub price: Decimal,

    /// Absolute change since previous close
    pub change: Decimal,

    /// Percent change since previous close
    pub change_percent: f64,

    /// Display-formatted trading volume
    pub volume: String,

    /// Display-formatted market capitalization
    pub market_cap: String,

    /// Trailing price/earnings ratio
    pub pe: f64,

    /// Day high
    pub high: Decimal,

    /// Day low
    pub low: Decimal,

    /// Day open
    pub open: Decimal,

    /// Previous session close
    pub previous_close: Decimal,

    /// 52-week high
    #[serde(default)]
    pub fifty_two_week_high: Decimal,

    /// 52-week low
    #[serde(default)]
    pub fifty_two_week_low: Decimal,

    /// Beta versus the market
    #[serde(default)]
    pub beta: f64,

    /// Dividend yield, already in percent
    #[serde(default)]
    pub dividend_yield: f64,

    /// Sector name, or "N/A"
    #[serde(default)]
    pub sector: String,

    /// Industry name, or "N/A"
    #[serde(default)]
    pub industry: String,

    /// Unformatted market capitalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap_raw: Option<u64>,

    /// Unformatted trading volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_raw: Option<u64>,

    /// Chart series for the requested period, ascending
    #[serde(default)]
    pub chart_data: Vec<PricePoint>,
}

impl StockSnapshot {
    /// Create a snapshot with the identifying fields set and everything
    /// else zeroed/empty.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }
}

/// Request body for the batched comparison endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Symbols to fetch, already normalized by the caller
    pub symbols: Vec<String>,

    /// Historical range
    pub period: Period,

    /// Sampling interval
    pub interval: Interval,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_deserializes_compare_payload() {
        let json = r#"{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "price": 189.84,
            "change": 1.32,
            "changePercent": 0.7,
            "volume": "52.4M",
            "marketCap": "2.9T",
            "pe": 29.51,
            "high": 190.5,
            "low": 187.9,
            "open": 188.2,
            "previousClose": 188.52,
            "fiftyTwoWeekHigh": 199.62,
            "fiftyTwoWeekLow": 164.08,
            "beta": 1.29,
            "dividendYield": 0.5,
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "marketCapRaw": 2900000000000,
            "volumeRaw": 52400000,
            "chartData": [
                {"date": "2024-01-02", "price": 185.64, "volume": 82488700, "open": 187.15, "high": 188.44, "low": 183.89},
                {"date": "2024-01-03", "price": 184.25, "volume": 58414500, "open": 184.22, "high": 185.88, "low": 183.43}
            ]
        }"#;

        let snapshot: StockSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.symbol, "AAPL");
        assert_eq!(snapshot.price, dec!(189.84));
        assert_eq!(snapshot.volume, "52.4M");
        assert_eq!(snapshot.market_cap_raw, Some(2_900_000_000_000));
        assert_eq!(snapshot.chart_data.len(), 2);
        assert_eq!(snapshot.chart_data[0].date, "2024-01-02");
        assert_eq!(snapshot.chart_data[0].volume, 82_488_700);
    }

    #[test]
    fn test_snapshot_without_chart_data() {
        let json = r#"{
            "symbol": "MSFT",
            "name": "Microsoft Corporation",
            "price": 411.22,
            "change": -2.05,
            "changePercent": -0.5,
            "volume": "18.7M",
            "marketCap": "3.1T",
            "pe": 35.6,
            "high": 414.2,
            "low": 409.8,
            "open": 413.0,
            "previousClose": 413.27
        }"#;

        let snapshot: StockSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.symbol, "MSFT");
        assert!(snapshot.chart_data.is_empty());
        assert!(snapshot.market_cap_raw.is_none());
        assert_eq!(snapshot.sector, "");
    }

    #[test]
    fn test_price_point_minimal_series() {
        let json = r#"{"date": "2024-01-02", "price": 185.64, "volume": 82488700}"#;
        let point: PricePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.price, dec!(185.64));
        assert!(point.open.is_none());
    }

    #[test]
    fn test_compare_request_wire_shape() {
        let request = CompareRequest {
            symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
            period: Period::OneMonth,
            interval: Interval::OneHour,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["symbols"][0], "AAPL");
        assert_eq!(json["period"], "1mo");
        assert_eq!(json["interval"], "1h");
    }
}
