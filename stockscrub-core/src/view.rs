//! Pure view model for the metrics panel and scrubber.
//!
//! `render` turns metrics and a marker position into display strings with a
//! tone per field. Hosts only copy these into widgets. Unknown values render
//! as [`UNKNOWN_TEXT`] with [`Tone::Unknown`], never as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Direction, PriceValue, WeekData};
use crate::metrics::{Baseline, DerivedMetrics};
use crate::scrubber::MarkerPosition;

pub const UNKNOWN_TEXT: &str = "N/A";

/// How a field should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl From<Direction> for Tone {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Tone::Positive,
            Direction::Down => Tone::Negative,
            Direction::Unknown => Tone::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub text: String,
    pub tone: Tone,
}

impl Field {
    fn neutral(text: String) -> Self {
        Self {
            text,
            tone: Tone::Neutral,
        }
    }

    fn unknown() -> Self {
        Self {
            text: UNKNOWN_TEXT.to_string(),
            tone: Tone::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.tone == Tone::Unknown
    }
}

/// Everything a host needs to draw the selected day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub date_label: String,
    pub date_iso: String,
    pub baseline_label: String,
    pub predicted_price: Field,
    pub predicted_change: Field,
    pub real_price: Field,
    pub real_change: Field,
    pub difference: Field,
    pub difference_pct: Field,
    pub marker: MarkerPosition,
}

/// What the chart area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(Box<ViewModel>),
}

pub fn render(metrics: &DerivedMetrics, marker: &MarkerPosition) -> ViewModel {
    ViewModel {
        date_label: date_label(metrics.date),
        date_iso: metrics.date.format("%Y-%m-%d").to_string(),
        baseline_label: baseline_label(metrics.baseline),
        predicted_price: Field::neutral(format_price(metrics.predicted_price)),
        predicted_change: pct_field(PriceValue::Known(metrics.predicted_change_pct)),
        real_price: match metrics.real_price {
            PriceValue::Known(p) => Field::neutral(format_price(p)),
            PriceValue::Unknown => Field::unknown(),
        },
        real_change: pct_field(metrics.real_change_pct),
        difference: match metrics.abs_difference {
            PriceValue::Known(d) => Field::neutral(format_price(d)),
            PriceValue::Unknown => Field::unknown(),
        },
        difference_pct: pct_field(metrics.difference_pct),
        marker: *marker,
    }
}

fn pct_field(value: PriceValue) -> Field {
    match value {
        PriceValue::Known(v) => Field {
            text: format_pct(v),
            tone: value.direction().into(),
        },
        PriceValue::Unknown => Field::unknown(),
    }
}

/// `Aug 18`, the label format used under each stop.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Labels for all five stops, oldest first.
pub fn day_labels(week: &WeekData) -> Vec<String> {
    week.historical.dates().iter().map(|d| date_label(*d)).collect()
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn format_pct(pct: f64) -> String {
    // Avoid "-0.00%" for tiny negative values.
    let rounded = (pct * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "+0.00%".to_string()
    } else {
        format!("{rounded:+.2}%")
    }
}

fn baseline_label(baseline: Baseline) -> String {
    match baseline {
        Baseline::PriorDay(p) => format!("vs prior day {}", format_price(p)),
        Baseline::PreviousClose(p) => format!("vs previous close {}", format_price(p)),
        Baseline::Unavailable => "no baseline".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawSeries, SelectionIndex};
    use crate::metrics::compute;

    fn week() -> WeekData {
        let dates: Vec<NaiveDate> = (18..=22)
            .map(|d| NaiveDate::from_ymd_opt(2025, 8, d).unwrap())
            .collect();
        let h = RawSeries::new(
            dates.clone(),
            vec![Some(100.0), Some(102.0), Some(101.0), Some(103.0), None],
        );
        let p = RawSeries::new(
            dates,
            vec![Some(101.0), Some(103.0), Some(100.0), Some(104.0), Some(105.0)],
        );
        WeekData::try_new(Some(&h), Some(&p), Some(99.0)).unwrap()
    }

    #[test]
    fn unknown_fields_are_marked_not_zeroed() {
        let w = week();
        let m = compute(&w, SelectionIndex::LAST);
        let v = render(&m, &MarkerPosition::at(SelectionIndex::LAST, None));
        assert_eq!(v.predicted_price.text, "$105.00");
        for field in [&v.real_price, &v.real_change, &v.difference, &v.difference_pct] {
            assert!(field.is_unknown());
            assert_eq!(field.text, UNKNOWN_TEXT);
        }
    }

    #[test]
    fn known_fields_have_sign_tones() {
        let w = week();
        let m = compute(&w, SelectionIndex::FIRST);
        let v = render(&m, &MarkerPosition::at(SelectionIndex::FIRST, None));
        assert_eq!(v.date_label, "Aug 18");
        assert_eq!(v.date_iso, "2025-08-18");
        assert_eq!(v.predicted_change.text, "+2.02%");
        assert_eq!(v.predicted_change.tone, Tone::Positive);
        assert_eq!(v.real_change.text, "+1.01%");
        assert_eq!(v.real_price.text, "$100.00");
        assert_eq!(v.baseline_label, "vs previous close $99.00");

        let m = compute(&w, SelectionIndex::clamped(2));
        let v = render(&m, &MarkerPosition::at(SelectionIndex::clamped(2), None));
        assert_eq!(v.real_change.tone, Tone::Negative);
        assert_eq!(v.difference_pct.text, "-0.99%");
    }

    #[test]
    fn pct_never_prints_negative_zero() {
        assert_eq!(format_pct(-0.0001), "+0.00%");
        assert_eq!(format_pct(1.234), "+1.23%");
        assert_eq!(format_pct(-1.236), "-1.24%");
    }

    #[test]
    fn day_labels_follow_historical_dates() {
        let labels = day_labels(&week());
        assert_eq!(labels, vec!["Aug 18", "Aug 19", "Aug 20", "Aug 21", "Aug 22"]);
    }
}
