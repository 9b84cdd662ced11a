//! Web backend provider.
//!
//! Fetches the two weekly series from the prediction backend's JSON
//! endpoints. No retries: any failure goes straight back to the caller, which
//! shows the error state until the user reloads.

use std::time::Duration;

use tracing::{debug, warn};

use super::payload::{parse_historical, parse_predicted};
use super::provider::{DataError, HistoricalFetch, WeekProvider};
use crate::config::BackendConfig;
use crate::domain::{RawSeries, Ticker};

pub struct BackendProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    historical_path: String,
    predicted_path: String,
}

impl BackendProvider {
    pub fn new(config: &BackendConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("stockscrub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            historical_path: config.historical_path.clone(),
            predicted_path: config.predicted_path.clone(),
        })
    }

    /// Expand a `{ticker}` path template against the base URL.
    fn url(&self, template: &str, ticker: &Ticker) -> String {
        let path = template.replace("{ticker}", ticker.as_str());
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn get(&self, url: &str, ticker: &Ticker) -> Result<String, DataError> {
        debug!(%url, "requesting series");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            // 404 also covers a known ticker with no rows; keep that message.
            return match parse_predicted(&body) {
                Err(DataError::BackendFailure(msg)) if !names_missing_ticker(&msg) => {
                    Err(DataError::BackendFailure(msg))
                }
                _ => Err(DataError::TickerNotFound {
                    ticker: ticker.to_string(),
                }),
            };
        }

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend returned an error status");
            // Error bodies carry `{success: false, error}`; prefer that message.
            return match parse_predicted(&body) {
                Err(e @ DataError::BackendFailure(_)) => Err(e),
                _ => Err(DataError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                }),
            };
        }

        Ok(body)
    }
}

/// Whether a 404 message says the ticker itself is unknown.
fn names_missing_ticker(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("not found") || message.contains("no error message")
}

impl WeekProvider for BackendProvider {
    fn name(&self) -> &str {
        "backend"
    }

    fn fetch_historical(&self, ticker: &Ticker) -> Result<HistoricalFetch, DataError> {
        let url = self.url(&self.historical_path, ticker);
        parse_historical(&self.get(&url, ticker)?)
    }

    fn fetch_predicted(&self, ticker: &Ticker) -> Result<RawSeries, DataError> {
        let url = self.url(&self.predicted_path, ticker);
        parse_predicted(&self.get(&url, ticker)?)
    }
}
