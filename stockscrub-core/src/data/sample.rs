//! Built-in sample week for offline demos and tests.
//!
//! Prices are derived from the ticker's bytes, so every ticker gets a
//! different but stable week. The last day's close is left unknown unless
//! the provider is told the day has closed.

use chrono::NaiveDate;

use super::provider::{DataError, HistoricalFetch, WeekProvider};
use crate::domain::{RawSeries, Ticker, WEEK_LEN};

/// Day-over-day moves of the actual close, in percent.
const ACTUAL_MOVES: [f64; WEEK_LEN] = [0.8, 1.2, -0.9, 1.6, 0.4];
/// Prediction error against the actual close, in percent.
const PREDICTION_ERROR: [f64; WEEK_LEN] = [0.6, -0.4, 1.1, -0.7, 0.9];

pub struct SampleProvider {
    last_day_closed: bool,
}

impl Default for SampleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleProvider {
    pub fn new() -> Self {
        Self {
            last_day_closed: false,
        }
    }

    /// Include the last day's close instead of leaving it unknown.
    pub fn with_closed_last_day(mut self) -> Self {
        self.last_day_closed = true;
        self
    }

    fn dates() -> Vec<NaiveDate> {
        (18..18 + WEEK_LEN as u32)
            .filter_map(|d| NaiveDate::from_ymd_opt(2025, 8, d))
            .collect()
    }

    fn previous_close(ticker: &Ticker) -> f64 {
        let seed: u32 = ticker.as_str().bytes().map(u32::from).sum();
        50.0 + f64::from(seed % 400) + f64::from(seed % 100) / 100.0
    }

    fn actual_closes(ticker: &Ticker) -> [f64; WEEK_LEN] {
        let mut price = Self::previous_close(ticker);
        let mut closes = [0.0; WEEK_LEN];
        for (close, pct) in closes.iter_mut().zip(ACTUAL_MOVES) {
            price *= 1.0 + pct / 100.0;
            *close = round_cents(price);
        }
        closes
    }
}

fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

impl WeekProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch_historical(&self, ticker: &Ticker) -> Result<HistoricalFetch, DataError> {
        let closes = Self::actual_closes(ticker);
        let prices = closes
            .iter()
            .enumerate()
            .map(|(i, &p)| (i + 1 < WEEK_LEN || self.last_day_closed).then_some(p))
            .collect();
        Ok(HistoricalFetch {
            series: RawSeries::new(Self::dates(), prices),
            previous_day_price: Some(round_cents(Self::previous_close(ticker))),
        })
    }

    fn fetch_predicted(&self, ticker: &Ticker) -> Result<RawSeries, DataError> {
        let prices = Self::actual_closes(ticker)
            .iter()
            .zip(PREDICTION_ERROR)
            .map(|(&p, err)| Some(round_cents(p * (1.0 + err / 100.0))))
            .collect();
        Ok(RawSeries::new(Self::dates(), prices))
    }
}
