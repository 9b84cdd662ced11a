//! Track and plot geometry.
//!
//! The marker on the track and the guide line on the chart are placed from
//! the same fraction, so they stay aligned at any container width. Offsets
//! are recomputed on every call from the latest widths.

use serde::{Deserialize, Serialize};

use crate::domain::SelectionIndex;

/// Latest known container widths, in cells (or pixels for other hosts).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub track_width: f64,
    pub plot_width: f64,
}

impl Geometry {
    pub fn new(track_width: f64, plot_width: f64) -> Self {
        Self {
            track_width: sanitize(track_width),
            plot_width: sanitize(plot_width),
        }
    }

    pub fn track_offset(&self, fraction: f64) -> Option<f64> {
        offset_in(self.track_width, fraction)
    }

    pub fn guide_offset(&self, fraction: f64) -> Option<f64> {
        offset_in(self.plot_width, fraction)
    }

    /// Inverse of `track_offset`: where along the track an offset falls.
    pub fn track_fraction(&self, offset: f64) -> Option<f64> {
        if self.track_width < 1.0 || !offset.is_finite() {
            return None;
        }
        let span = self.track_width - 1.0;
        if span <= 0.0 {
            return Some(0.0);
        }
        Some((offset / span).clamp(0.0, 1.0))
    }
}

fn sanitize(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}

/// Offset of `fraction` along a container; the last cell is `width - 1`.
fn offset_in(width: f64, fraction: f64) -> Option<f64> {
    if width < 1.0 {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * (width - 1.0))
}

/// Where the current selection is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPosition {
    pub index: SelectionIndex,
    pub fraction: f64,
    /// `None` until a non-zero width is known.
    pub track_offset: Option<f64>,
    pub guide_offset: Option<f64>,
}

impl MarkerPosition {
    pub fn at(index: SelectionIndex, geometry: Option<&Geometry>) -> Self {
        let fraction = index.fraction();
        Self {
            index,
            fraction,
            track_offset: geometry.and_then(|g| g.track_offset(fraction)),
            guide_offset: geometry.and_then(|g| g.guide_offset(fraction)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_span_first_to_last_cell() {
        let g = Geometry::new(81.0, 41.0);
        assert_eq!(g.track_offset(0.0), Some(0.0));
        assert_eq!(g.track_offset(1.0), Some(80.0));
        assert_eq!(g.guide_offset(0.5), Some(20.0));
    }

    #[test]
    fn zero_width_has_no_offset() {
        let g = Geometry::new(0.0, f64::NAN);
        assert_eq!(g.track_offset(0.5), None);
        assert_eq!(g.guide_offset(0.5), None);
    }

    #[test]
    fn track_fraction_inverts_offset() {
        let g = Geometry::new(41.0, 10.0);
        assert_eq!(g.track_fraction(10.0), Some(0.25));
        assert_eq!(g.track_fraction(-5.0), Some(0.0));
        assert_eq!(g.track_fraction(500.0), Some(1.0));
    }

    #[test]
    fn marker_without_geometry_keeps_fraction() {
        let m = MarkerPosition::at(SelectionIndex::clamped(3), None);
        assert_eq!(m.fraction, 0.75);
        assert_eq!(m.track_offset, None);
    }
}
