//! Chart period and sampling interval enumerations.
//!
//! Periods and intervals travel as short lowercase strings on the wire
//! (`"1mo"`, `"5m"`, ...). Each period carries the chart interval the
//! dashboard uses by default when the caller has no stronger opinion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Historical time range for a chart request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// One trading day
    #[serde(rename = "1d")]
    OneDay,
    /// Five trading days
    #[serde(rename = "5d")]
    FiveDays,
    /// One month
    #[serde(rename = "1mo")]
    OneMonth,
    /// Three months
    #[serde(rename = "3mo")]
    ThreeMonths,
    /// Six months
    #[serde(rename = "6mo")]
    SixMonths,
    /// One year
    #[serde(rename = "1y")]
    OneYear,
    /// Two years
    #[serde(rename = "2y")]
    TwoYears,
    /// Five years
    #[serde(rename = "5y")]
    FiveYears,
    /// Full available history
    #[serde(rename = "max")]
    Max,
}

/// Sampling interval for chart data points.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// Five-minute samples (intraday)
    #[serde(rename = "5m")]
    FiveMinutes,
    /// Fifteen-minute samples (intraday)
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// Hourly samples (intraday)
    #[serde(rename = "1h")]
    OneHour,
    /// Daily samples
    #[serde(rename = "1d")]
    OneDay,
}

/// A period string the dashboard does not recognize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized period: {0}")]
pub struct InvalidPeriod(pub String);

/// An interval string the dashboard does not recognize.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized interval: {0}")]
pub struct InvalidInterval(pub String);

impl Period {
    /// All supported periods, in display order.
    pub const ALL: [Period; 9] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::Max,
    ];

    /// The wire representation of this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }

    /// The chart interval the dashboard pairs with this period.
    ///
    /// Short periods get intraday sampling; anything from three months
    /// up is daily.
    pub fn default_interval(&self) -> Interval {
        match self {
            Period::OneDay => Interval::FiveMinutes,
            Period::FiveDays => Interval::FifteenMinutes,
            Period::OneMonth => Interval::OneHour,
            Period::ThreeMonths
            | Period::SixMonths
            | Period::OneYear
            | Period::TwoYears
            | Period::FiveYears
            | Period::Max => Interval::OneDay,
        }
    }
}

impl Interval {
    /// The wire representation of this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
        }
    }

    /// Whether samples at this interval carry a time-of-day component.
    pub fn is_intraday(&self) -> bool {
        !matches!(self, Interval::OneDay)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Period::OneDay),
            "5d" => Ok(Period::FiveDays),
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "5y" => Ok(Period::FiveYears),
            "max" => Ok(Period::Max),
            other => Err(InvalidPeriod(other.to_string())),
        }
    }
}

impl FromStr for Interval {
    type Err = InvalidInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Interval::FiveMinutes),
            "15m" => Ok(Interval::FifteenMinutes),
            "1h" => Ok(Interval::OneHour),
            "1d" => Ok(Interval::OneDay),
            other => Err(InvalidInterval(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_string_round_trip() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
    }

    #[test]
    fn test_period_rejects_unknown_string() {
        let err = "7w".parse::<Period>().unwrap_err();
        assert_eq!(err, InvalidPeriod("7w".to_string()));
    }

    #[test]
    fn test_default_intervals() {
        assert_eq!(Period::OneDay.default_interval(), Interval::FiveMinutes);
        assert_eq!(Period::FiveDays.default_interval(), Interval::FifteenMinutes);
        assert_eq!(Period::OneMonth.default_interval(), Interval::OneHour);
        assert_eq!(Period::ThreeMonths.default_interval(), Interval::OneDay);
        assert_eq!(Period::Max.default_interval(), Interval::OneDay);
    }

    #[test]
    fn test_intraday_detection() {
        assert!(Interval::FiveMinutes.is_intraday());
        assert!(Interval::OneHour.is_intraday());
        assert!(!Interval::OneDay.is_intraday());
    }

    #[test]
    fn test_period_serializes_as_wire_string() {
        assert_eq!(serde_json::to_string(&Period::OneMonth).unwrap(), "\"1mo\"");
        assert_eq!(serde_json::to_string(&Interval::OneHour).unwrap(), "\"1h\"");
    }

    #[test]
    fn test_period_deserializes_from_wire_string() {
        let period: Period = serde_json::from_str("\"5y\"").unwrap();
        assert_eq!(period, Period::FiveYears);
    }
}
