//! Error types and recovery classification for stock data fetching.
//!
//! This module provides:
//! - [`FetchError`]: The error enum for all cache/fetch operations
//! - [`Recovery`]: Classification for how the consumer should react

mod recovery;

pub use recovery::Recovery;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while fetching or coalescing stock data.
///
/// Each variant is classified into a [`Recovery`] via the
/// [`recovery`](Self::recovery) method, which tells the consuming UI how
/// the user can get unstuck. No variant is fatal and none triggers an
/// automatic retry.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The symbol list was empty after trimming blanks.
    /// Rejected locally, before any network traffic.
    #[error("no valid symbols in request")]
    EmptyRequest,

    /// More symbols than the backend accepts in one comparison.
    /// Rejected locally rather than spending a doomed network call.
    #[error("too many symbols: {requested} requested, limit is {limit}")]
    TooManySymbols {
        /// How many symbols were requested
        requested: usize,
        /// The backend's per-request limit
        limit: usize,
    },

    /// The batched fetch exceeded its deadline. The in-flight request is
    /// aborted when the deadline fires, not abandoned.
    #[error("request timed out")]
    RequestTimeout,

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}")]
    Status {
        /// The status code from the response
        status: StatusCode,
    },

    /// The transport failed before a status was available, or the
    /// response body could not be decoded.
    #[error("network error: {0}")]
    Network(reqwest::Error),

    /// The backend answered successfully but with an empty payload.
    #[error("no data for requested symbols")]
    NoData,
}

impl FetchError {
    /// Returns the recovery classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerlens_market_data::errors::{FetchError, Recovery};
    ///
    /// assert_eq!(FetchError::EmptyRequest.recovery(), Recovery::PromptForInput);
    /// assert_eq!(FetchError::RequestTimeout.recovery(), Recovery::RetryOrShortenPeriod);
    /// ```
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::EmptyRequest | Self::TooManySymbols { .. } => Recovery::PromptForInput,
            Self::RequestTimeout => Recovery::RetryOrShortenPeriod,
            Self::Status { .. } | Self::Network(_) => Recovery::Retry,
            Self::NoData => Recovery::NothingFound,
        }
    }

    /// A ready-made message for the error banner the UI shows on failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyRequest => "Please enter at least one stock symbol",
            Self::TooManySymbols { .. } => "Maximum 5 stocks allowed",
            Self::RequestTimeout => {
                "Request timed out. Please try a shorter time period or try again."
            }
            Self::Status { .. } | Self::Network(_) => {
                "Failed to fetch stock data. Please try again."
            }
            Self::NoData => "No data found for the entered stock symbols",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    /// A timeout reported by the HTTP client itself is the same failure
    /// as losing the orchestrator's deadline race, so both normalize to
    /// [`FetchError::RequestTimeout`].
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::RequestTimeout
        } else {
            FetchError::Network(error)
        }
    }
}
