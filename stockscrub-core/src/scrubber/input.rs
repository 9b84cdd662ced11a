//! Input mapping: pointer fractions and keys to a selection.

use serde::{Deserialize, Serialize};

use crate::domain::{SelectionIndex, STOP_POSITIONS};

/// Nearest stop to a track fraction.
///
/// Input is clamped to `[0, 1]`. Ties resolve to the lower index because only
/// a strictly smaller distance replaces the current best. Returns `None` for
/// non-finite input.
pub fn nearest_stop(fraction: f64) -> Option<SelectionIndex> {
    if !fraction.is_finite() {
        return None;
    }
    let p = fraction.clamp(0.0, 1.0);
    let mut best = 0usize;
    let mut best_distance = f64::INFINITY;
    for (i, stop) in STOP_POSITIONS.iter().enumerate() {
        let distance = (p - stop).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    Some(SelectionIndex::clamped(best as i64))
}

/// Keys the scrubber reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrubKey {
    Left,
    Right,
    Home,
    End,
}

impl ScrubKey {
    /// Selection after pressing this key at `current`.
    pub fn apply(self, current: SelectionIndex) -> SelectionIndex {
        match self {
            ScrubKey::Left => current.step(-1),
            ScrubKey::Right => current.step(1),
            ScrubKey::Home => SelectionIndex::FIRST,
            ScrubKey::End => SelectionIndex::LAST,
        }
    }
}

impl std::str::FromStr for ScrubKey {
    type Err = String;

    /// Accepts DOM key names (`ArrowLeft`, `ArrowRight`, `Home`, `End`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" => Ok(ScrubKey::Left),
            "ArrowRight" => Ok(ScrubKey::Right),
            "Home" => Ok(ScrubKey::Home),
            "End" => Ok(ScrubKey::End),
            other => Err(format!("unhandled key: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_nearest_stop() {
        assert_eq!(nearest_stop(0.4).unwrap().get(), 2);
        assert_eq!(nearest_stop(0.1).unwrap().get(), 0);
        assert_eq!(nearest_stop(0.9).unwrap().get(), 4);
        assert_eq!(nearest_stop(0.6).unwrap().get(), 2);
    }

    #[test]
    fn ties_resolve_to_lower_index() {
        assert_eq!(nearest_stop(0.125).unwrap().get(), 0);
        assert_eq!(nearest_stop(0.375).unwrap().get(), 1);
        assert_eq!(nearest_stop(0.875).unwrap().get(), 3);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(nearest_stop(-2.0).unwrap().get(), 0);
        assert_eq!(nearest_stop(7.0).unwrap().get(), 4);
        assert_eq!(nearest_stop(f64::NAN), None);
    }

    #[test]
    fn parses_dom_key_names() {
        assert_eq!("ArrowLeft".parse::<ScrubKey>(), Ok(ScrubKey::Left));
        assert_eq!("End".parse::<ScrubKey>(), Ok(ScrubKey::End));
        assert!("Enter".parse::<ScrubKey>().is_err());
    }

    #[test]
    fn keys_clamp() {
        assert_eq!(ScrubKey::Right.apply(SelectionIndex::LAST), SelectionIndex::LAST);
        assert_eq!(ScrubKey::Right.apply(SelectionIndex::FIRST).get(), 1);
        assert_eq!(ScrubKey::Left.apply(SelectionIndex::FIRST), SelectionIndex::FIRST);
        assert_eq!(ScrubKey::Home.apply(SelectionIndex::clamped(3)), SelectionIndex::FIRST);
        assert_eq!(ScrubKey::End.apply(SelectionIndex::clamped(1)), SelectionIndex::LAST);
    }
}
