//! PriceValue: a price or percentage that may be unknown.
//!
//! The latest trading day of a week can be missing its close. That case is
//! carried as an explicit `Unknown` instead of `0.0` or `NaN`, so display code
//! can never mistake missing data for a flat price.

use serde::{Deserialize, Serialize};

/// A numeric value that is either known or explicitly unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PriceValue {
    Known(f64),
    Unknown,
}

/// Display direction of a value: the tri-state the UI colors by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Unknown,
}

impl PriceValue {
    /// Wrap an optional value; `None` becomes `Unknown`.
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => PriceValue::Known(v),
            None => PriceValue::Unknown,
        }
    }

    pub fn known(self) -> Option<f64> {
        match self {
            PriceValue::Known(v) => Some(v),
            PriceValue::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, PriceValue::Known(_))
    }

    /// Apply `f` to a known value; unknown stays unknown.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            PriceValue::Known(v) => PriceValue::Known(f(v)),
            PriceValue::Unknown => PriceValue::Unknown,
        }
    }

    /// Zero counts as `Up`, matching how gains are colored.
    pub fn direction(self) -> Direction {
        match self {
            PriceValue::Known(v) if v >= 0.0 => Direction::Up,
            PriceValue::Known(_) => Direction::Down,
            PriceValue::Unknown => Direction::Unknown,
        }
    }
}

impl From<f64> for PriceValue {
    fn from(v: f64) -> Self {
        PriceValue::Known(v)
    }
}
