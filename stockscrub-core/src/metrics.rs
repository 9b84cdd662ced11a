//! Derived comparison metrics for the selected day.
//!
//! Metrics are a pure function of `(week, index)` and are rebuilt on every
//! read; nothing here is cached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PriceValue, SelectionIndex, WeekData};

/// Reference price used as the denominator of a day's percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "price", rename_all = "snake_case")]
pub enum Baseline {
    /// Actual close of the previous day in the week.
    PriorDay(f64),
    /// Close of the trading day before the week started (day 0 only).
    PreviousClose(f64),
    /// Day 0 with no usable previous close; changes are reported as 0.
    Unavailable,
}

impl Baseline {
    pub fn price(self) -> Option<f64> {
        match self {
            Baseline::PriorDay(p) | Baseline::PreviousClose(p) => Some(p),
            Baseline::Unavailable => None,
        }
    }

    /// Percentage change from the baseline to `price`.
    fn change_pct(self, price: f64) -> f64 {
        match self.price() {
            Some(base) => (price - base) / base * 100.0,
            None => 0.0,
        }
    }
}

/// Everything the metrics panel shows for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub index: SelectionIndex,
    pub date: NaiveDate,
    pub baseline: Baseline,
    pub predicted_price: f64,
    pub predicted_change_pct: f64,
    pub real_price: PriceValue,
    pub real_change_pct: PriceValue,
    pub abs_difference: PriceValue,
    /// Signed: `(predicted - real) / real * 100`.
    pub difference_pct: PriceValue,
}

/// Baseline for `index`: the previous day's actual price, or for day 0 the
/// previous close when it is present and positive.
pub fn baseline_for(week: &WeekData, index: SelectionIndex) -> Baseline {
    if index.get() > 0 {
        // Slots before the last are always known after validation.
        match week.historical.price(index.step(-1)) {
            PriceValue::Known(p) => Baseline::PriorDay(p),
            PriceValue::Unknown => Baseline::Unavailable,
        }
    } else {
        match week.historical.previous_day_price() {
            Some(p) if p > 0.0 => Baseline::PreviousClose(p),
            _ => Baseline::Unavailable,
        }
    }
}

pub fn compute(week: &WeekData, index: SelectionIndex) -> DerivedMetrics {
    let baseline = baseline_for(week, index);
    let predicted_price = week.predicted.price(index);
    let real_price = week.historical.price(index);

    let real_change_pct = real_price.map(|real| baseline.change_pct(real));
    let signed_difference = real_price.map(|real| predicted_price - real);
    let difference_pct = match real_price {
        PriceValue::Known(real) => PriceValue::Known((predicted_price - real) / real * 100.0),
        PriceValue::Unknown => PriceValue::Unknown,
    };

    DerivedMetrics {
        index,
        date: week.date(index),
        baseline,
        predicted_price,
        predicted_change_pct: baseline.change_pct(predicted_price),
        real_price,
        real_change_pct,
        abs_difference: signed_difference.map(f64::abs),
        difference_pct,
    }
}

/// Metrics for all five days, oldest first.
pub fn compute_week(week: &WeekData) -> Vec<DerivedMetrics> {
    SelectionIndex::all().map(|i| compute(week, i)).collect()
}
