//! Week series: five dated prices for one ticker.
//!
//! Raw series come from a data source with any length and optional prices.
//! Validation turns them into fixed-size arrays so that every later index
//! lookup is infallible.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::price::PriceValue;
use super::selection::SelectionIndex;

/// Trading days per week; both series always have this many points.
pub const WEEK_LEN: usize = 5;

/// Which of the two series a value or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Historical,
    Predicted,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Historical => write!(f, "historical"),
            SeriesKind::Predicted => write!(f, "predicted"),
        }
    }
}

/// Why a raw series was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("{kind} series is missing")]
    Missing { kind: SeriesKind },

    #[error("{kind} series has {dates} dates and {prices} prices, expected {n} of each", n = WEEK_LEN)]
    WrongLength {
        kind: SeriesKind,
        dates: usize,
        prices: usize,
    },

    #[error("{kind} series dates are not strictly increasing at slot {index}")]
    DatesNotIncreasing { kind: SeriesKind, index: usize },

    #[error("{kind} price at slot {index} is missing")]
    MissingPrice { kind: SeriesKind, index: usize },

    #[error("{kind} price at slot {index} is not a positive finite number ({value})")]
    InvalidPrice {
        kind: SeriesKind,
        index: usize,
        value: f64,
    },
}

/// Unvalidated series as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<Option<f64>>,
}

impl RawSeries {
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<Option<f64>>) -> Self {
        Self { dates, prices }
    }

    fn checked_dates(&self, kind: SeriesKind) -> Result<[NaiveDate; WEEK_LEN], SeriesError> {
        if self.dates.len() != WEEK_LEN || self.prices.len() != WEEK_LEN {
            return Err(SeriesError::WrongLength {
                kind,
                dates: self.dates.len(),
                prices: self.prices.len(),
            });
        }
        for (i, pair) in self.dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SeriesError::DatesNotIncreasing { kind, index: i + 1 });
            }
        }
        let mut dates = [NaiveDate::MIN; WEEK_LEN];
        dates.copy_from_slice(&self.dates);
        Ok(dates)
    }
}

fn valid_price(kind: SeriesKind, index: usize, price: Option<f64>) -> Result<f64, SeriesError> {
    match price {
        None => Err(SeriesError::MissingPrice { kind, index }),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(SeriesError::InvalidPrice { kind, index, value: v }),
    }
}

/// Observed closing prices. Only the last slot may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    dates: [NaiveDate; WEEK_LEN],
    prices: [PriceValue; WEEK_LEN],
    previous_day_price: Option<f64>,
}

impl HistoricalSeries {
    /// Validate a raw historical series.
    ///
    /// The last slot decodes `null`, zero, negative and `NaN` to `Unknown`:
    /// the backend writes `0.0` for a day that has not closed yet.
    /// A non-positive previous-day price is dropped.
    pub fn try_from_raw(
        raw: &RawSeries,
        previous_day_price: Option<f64>,
    ) -> Result<Self, SeriesError> {
        let kind = SeriesKind::Historical;
        let dates = raw.checked_dates(kind)?;
        let mut prices = [PriceValue::Unknown; WEEK_LEN];
        for (i, price) in raw.prices.iter().copied().enumerate() {
            prices[i] = if i == WEEK_LEN - 1 {
                match price {
                    Some(v) if v.is_infinite() => {
                        return Err(SeriesError::InvalidPrice { kind, index: i, value: v })
                    }
                    Some(v) if v > 0.0 => PriceValue::Known(v),
                    _ => PriceValue::Unknown,
                }
            } else {
                PriceValue::Known(valid_price(kind, i, price)?)
            };
        }
        Ok(Self {
            dates,
            prices,
            previous_day_price: previous_day_price.filter(|p| p.is_finite() && *p > 0.0),
        })
    }

    pub fn date(&self, index: SelectionIndex) -> NaiveDate {
        self.dates[index.get()]
    }

    pub fn price(&self, index: SelectionIndex) -> PriceValue {
        self.prices[index.get()]
    }

    pub fn dates(&self) -> &[NaiveDate; WEEK_LEN] {
        &self.dates
    }

    pub fn prices(&self) -> &[PriceValue; WEEK_LEN] {
        &self.prices
    }

    pub fn previous_day_price(&self) -> Option<f64> {
        self.previous_day_price
    }
}

/// Model output prices. Every slot is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedSeries {
    dates: [NaiveDate; WEEK_LEN],
    prices: [f64; WEEK_LEN],
}

impl PredictedSeries {
    pub fn try_from_raw(raw: &RawSeries) -> Result<Self, SeriesError> {
        let kind = SeriesKind::Predicted;
        let dates = raw.checked_dates(kind)?;
        let mut prices = [0.0; WEEK_LEN];
        for (i, price) in raw.prices.iter().copied().enumerate() {
            prices[i] = valid_price(kind, i, price)?;
        }
        Ok(Self { dates, prices })
    }

    pub fn date(&self, index: SelectionIndex) -> NaiveDate {
        self.dates[index.get()]
    }

    pub fn price(&self, index: SelectionIndex) -> f64 {
        self.prices[index.get()]
    }

    pub fn dates(&self) -> &[NaiveDate; WEEK_LEN] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64; WEEK_LEN] {
        &self.prices
    }
}

/// A validated pair of series for one ticker and week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekData {
    pub historical: HistoricalSeries,
    pub predicted: PredictedSeries,
}

impl WeekData {
    /// Validate both series. Absent input is a `Missing` error.
    ///
    /// Dates that differ between the two series are accepted; labels follow
    /// the historical dates.
    pub fn try_new(
        historical: Option<&RawSeries>,
        predicted: Option<&RawSeries>,
        previous_day_price: Option<f64>,
    ) -> Result<Self, SeriesError> {
        let historical = historical.ok_or(SeriesError::Missing {
            kind: SeriesKind::Historical,
        })?;
        let predicted = predicted.ok_or(SeriesError::Missing {
            kind: SeriesKind::Predicted,
        })?;
        let historical = HistoricalSeries::try_from_raw(historical, previous_day_price)?;
        let predicted = PredictedSeries::try_from_raw(predicted)?;
        if historical.dates() != predicted.dates() {
            warn!(
                historical_start = %historical.dates()[0],
                predicted_start = %predicted.dates()[0],
                "historical and predicted dates differ, labelling by historical dates"
            );
        }
        Ok(Self {
            historical,
            predicted,
        })
    }

    pub fn date(&self, index: SelectionIndex) -> NaiveDate {
        self.historical.date(index)
    }
}
