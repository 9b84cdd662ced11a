//! SelectionIndex: which of the five trading days is selected.

use serde::{Deserialize, Serialize};

use super::series::WEEK_LEN;

/// Fractional track position of each stop, one per trading day.
pub const STOP_POSITIONS: [f64; WEEK_LEN] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Index of the selected day, always in `[0, 4]`.
///
/// The only constructors clamp, so every value is a valid index into both
/// series of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SelectionIndex(u8);

impl SelectionIndex {
    pub const FIRST: SelectionIndex = SelectionIndex(0);
    pub const LAST: SelectionIndex = SelectionIndex((WEEK_LEN - 1) as u8);

    /// Clamp any integer into range.
    pub fn clamped(index: i64) -> Self {
        let max = (WEEK_LEN - 1) as i64;
        SelectionIndex(index.clamp(0, max) as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Fractional track position of this day's stop.
    pub fn fraction(self) -> f64 {
        STOP_POSITIONS[self.get()]
    }

    /// Step by `delta` days, clamped at both ends.
    pub fn step(self, delta: i64) -> Self {
        Self::clamped(self.0 as i64 + delta)
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    pub fn all() -> impl Iterator<Item = SelectionIndex> {
        (0..WEEK_LEN as u8).map(SelectionIndex)
    }
}

impl Default for SelectionIndex {
    /// The most recent day.
    fn default() -> Self {
        Self::LAST
    }
}

impl TryFrom<usize> for SelectionIndex {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value < WEEK_LEN {
            Ok(SelectionIndex(value as u8))
        } else {
            Err(format!("selection index {value} out of range 0..{WEEK_LEN}"))
        }
    }
}

impl From<SelectionIndex> for usize {
    fn from(index: SelectionIndex) -> usize {
        index.get()
    }
}

impl std::fmt::Display for SelectionIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
