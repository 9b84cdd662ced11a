//! Pointer capture for dragging the handle.
//!
//! A pointer-down on the handle captures the pointer; moves are consumed only
//! while captured and pointer-up always releases, so a drag cannot get stuck
//! when the pointer leaves the track.

use serde::{Deserialize, Serialize};

/// Cells either side of the handle that still count as a hit on a wide track.
pub const HANDLE_SLOP: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Captured,
}

/// What a pointer-down did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// Landed on the handle; following moves drag it.
    Captured,
    /// Landed elsewhere on the track; selection jumped to the nearest stop.
    Jumped,
    /// Outside the track, or nothing loaded.
    Ignored,
}

impl DragState {
    pub fn is_captured(self) -> bool {
        self == DragState::Captured
    }
}

/// Hit tolerance for a track `track_width` cells wide. Stays within half the
/// stop spacing so a press on a neighbouring stop is never read as the handle.
pub fn handle_slop(track_width: f64) -> f64 {
    HANDLE_SLOP.min((track_width - 1.0).max(0.0) / 8.0)
}

pub fn hits_handle(handle_offset: f64, pointer_offset: f64, track_width: f64) -> bool {
    (pointer_offset - handle_offset).abs() <= handle_slop(track_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_hit_has_slop() {
        assert!(hits_handle(10.0, 10.0, 41.0));
        assert!(hits_handle(10.0, 11.0, 41.0));
        assert!(hits_handle(10.0, 9.0, 41.0));
        assert!(!hits_handle(10.0, 12.0, 41.0));
    }

    #[test]
    fn slop_shrinks_on_narrow_tracks() {
        assert_eq!(handle_slop(41.0), 1.0);
        assert_eq!(handle_slop(9.0), 1.0);
        assert_eq!(handle_slop(5.0), 0.5);
        assert_eq!(handle_slop(1.0), 0.0);
        // Stops one cell apart: the neighbour is not the handle.
        assert!(hits_handle(4.0, 4.0, 5.0));
        assert!(!hits_handle(4.0, 3.0, 5.0));
    }
}
