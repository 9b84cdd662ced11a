//! JSON payloads of the weekly series endpoints.
//!
//! Shape: `{ success, data: { ticker, dates, formatted_dates, prices,
//! previous_day_price, total_days, date_range }, error }`. Only `success`,
//! `dates` and `prices` are required; everything else is informational.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::provider::{DataError, HistoricalFetch};
use crate::domain::{RawSeries, Ticker};
use crate::view::date_label;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<SeriesPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPayload {
    #[serde(default)]
    pub ticker: Option<String>,
    pub dates: Vec<String>,
    #[serde(default)]
    pub formatted_dates: Vec<String>,
    pub prices: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_day_price: Option<f64>,
    #[serde(default)]
    pub total_days: Option<usize>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl SeriesPayload {
    fn raw_series(&self) -> Result<RawSeries, DataError> {
        let dates = self
            .dates
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|e| DataError::Malformed(format!("invalid date '{d}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RawSeries::new(dates, self.prices.clone()))
    }

    /// Payload in the backend's shape, for dumping a series as JSON.
    pub fn from_series(ticker: &Ticker, series: &RawSeries, previous_day_price: Option<f64>) -> Self {
        let dates: Vec<String> = series
            .dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
        Self {
            ticker: Some(ticker.to_string()),
            formatted_dates: series.dates.iter().map(|d| date_label(*d)).collect(),
            prices: series.prices.clone(),
            previous_day_price,
            total_days: Some(dates.len()),
            date_range: Some(DateRange {
                start: dates.first().cloned(),
                end: dates.last().cloned(),
            }),
            dates,
        }
    }
}

fn parse_response(body: &str) -> Result<SeriesPayload, DataError> {
    let response: SeriesResponse = serde_json::from_str(body)
        .map_err(|e| DataError::Malformed(format!("failed to parse response: {e}")))?;
    if !response.success {
        return Err(DataError::BackendFailure(
            response
                .error
                .unwrap_or_else(|| "success: false with no error message".into()),
        ));
    }
    response
        .data
        .ok_or_else(|| DataError::Malformed("success: true but no data".into()))
}

pub fn parse_historical(body: &str) -> Result<HistoricalFetch, DataError> {
    let payload = parse_response(body)?;
    Ok(HistoricalFetch {
        series: payload.raw_series()?,
        previous_day_price: payload.previous_day_price,
    })
}

pub fn parse_predicted(body: &str) -> Result<RawSeries, DataError> {
    parse_response(body)?.raw_series()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORICAL: &str = r#"{
        "success": true,
        "data": {
            "ticker": "AAPL",
            "dates": ["2025-08-18", "2025-08-19", "2025-08-20", "2025-08-21", "2025-08-22"],
            "formatted_dates": ["Aug 18", "Aug 19", "Aug 20", "Aug 21", "Aug 22"],
            "prices": [230.1, 231.5, 229.9, 232.4, null],
            "previous_day_price": 228.7,
            "total_days": 5,
            "date_range": {"start": "2025-08-18", "end": "2025-08-22"}
        }
    }"#;

    #[test]
    fn parses_historical_with_unknown_last_price() {
        let fetch = parse_historical(HISTORICAL).unwrap();
        assert_eq!(fetch.series.dates.len(), 5);
        assert_eq!(fetch.series.prices[4], None);
        assert_eq!(fetch.previous_day_price, Some(228.7));
    }

    #[test]
    fn minimal_predicted_payload() {
        let body = r#"{"success": true, "data": {
            "dates": ["2025-08-18", "2025-08-19", "2025-08-20", "2025-08-21", "2025-08-22"],
            "prices": [1, 2, 3, 4, 5]}}"#;
        let series = parse_predicted(body).unwrap();
        assert_eq!(series.prices[2], Some(3.0));
    }

    #[test]
    fn success_false_carries_backend_message() {
        let body = r#"{"success": false, "error": "Ticker ZZZ not found."}"#;
        match parse_predicted(body) {
            Err(DataError::BackendFailure(msg)) => assert!(msg.contains("ZZZ")),
            other => panic!("expected BackendFailure, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_price_is_malformed() {
        let body = r#"{"success": true, "data": {"dates": ["2025-08-18"], "prices": ["abc"]}}"#;
        assert!(matches!(parse_predicted(body), Err(DataError::Malformed(_))));
    }

    #[test]
    fn bad_date_is_malformed() {
        let body = r#"{"success": true, "data": {"dates": ["Aug 18"], "prices": [1.0]}}"#;
        assert!(matches!(parse_predicted(body), Err(DataError::Malformed(_))));
    }

    #[test]
    fn payload_from_series_matches_backend_shape() {
        let fetch = parse_historical(HISTORICAL).unwrap();
        let ticker = Ticker::parse("aapl").unwrap();
        let payload = SeriesPayload::from_series(&ticker, &fetch.series, fetch.previous_day_price);
        assert_eq!(payload.formatted_dates[0], "Aug 18");
        assert_eq!(payload.total_days, Some(5));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(json["date_range"]["end"], "2025-08-22");
    }
}
