//! Week provider trait and structured error types.
//!
//! The WeekProvider trait abstracts over where the two series come from
//! (the web backend, the CSV files behind it, a built-in sample) so the TUI
//! and CLI can swap sources and tests can run offline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{RawSeries, Ticker, TickerError};

/// Structured error types for data operations.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("backend reported failure: {0}")]
    BackendFailure(String),

    #[error("ticker not found: {ticker}")]
    TickerNotFound { ticker: String },

    #[error(transparent)]
    InvalidTicker(#[from] TickerError),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("CSV error in {path}: {message}")]
    Csv { path: String, message: String },

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// Short category label for error history displays.
    pub fn category(&self) -> &'static str {
        match self {
            DataError::NetworkUnreachable(_) | DataError::HttpStatus { .. } => "network",
            DataError::BackendFailure(_) | DataError::TickerNotFound { .. } => "backend",
            DataError::InvalidTicker(_) => "input",
            DataError::Malformed(_) | DataError::Csv { .. } => "data",
            DataError::Other(_) => "other",
        }
    }
}

/// Historical series plus the close of the day before it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalFetch {
    pub series: RawSeries,
    pub previous_day_price: Option<f64>,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Http,
    Csv,
    Sample,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Http => write!(f, "http"),
            DataSource::Csv => write!(f, "csv"),
            DataSource::Sample => write!(f, "sample"),
        }
    }
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(DataSource::Http),
            "csv" => Ok(DataSource::Csv),
            "sample" => Ok(DataSource::Sample),
            other => Err(format!("unknown data source '{other}' (expected http, csv or sample)")),
        }
    }
}

/// Trait for week data providers.
///
/// Implementations fetch one series per call and do not retry; a failure is
/// reported straight back to the caller.
pub trait WeekProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn fetch_historical(&self, ticker: &Ticker) -> Result<HistoricalFetch, DataError>;

    fn fetch_predicted(&self, ticker: &Ticker) -> Result<RawSeries, DataError>;
}

/// Both series for a ticker, fetched back to back.
#[derive(Debug)]
pub struct WeekFetch {
    pub historical: Result<HistoricalFetch, DataError>,
    pub predicted: Result<RawSeries, DataError>,
}

impl WeekFetch {
    pub fn fetch(provider: &dyn WeekProvider, ticker: &Ticker) -> Self {
        Self {
            historical: provider.fetch_historical(ticker),
            predicted: provider.fetch_predicted(ticker),
        }
    }

    /// First error of the two, if any.
    pub fn error(&self) -> Option<&DataError> {
        self.historical
            .as_ref()
            .err()
            .or_else(|| self.predicted.as_ref().err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parses_case_insensitively() {
        assert_eq!("CSV".parse::<DataSource>(), Ok(DataSource::Csv));
        assert_eq!("sample".parse::<DataSource>(), Ok(DataSource::Sample));
        assert!("ftp".parse::<DataSource>().is_err());
    }

    #[test]
    fn categories() {
        assert_eq!(DataError::NetworkUnreachable("x".into()).category(), "network");
        assert_eq!(DataError::Malformed("x".into()).category(), "data");
        assert_eq!(
            DataError::TickerNotFound { ticker: "ZZZ".into() }.category(),
            "backend"
        );
    }
}
