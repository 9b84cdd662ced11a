//! ChartScrubber: five-stop day selector over a loaded week.
//!
//! Owns the only mutable UI state (the selected day and the loaded week) and
//! maps pointer and keyboard input onto it. Metrics and the view model are
//! derived on every read. Hosts call the public methods from their input
//! handlers; none of them panic, and invalid input is logged and ignored.

pub mod drag;
pub mod geometry;
pub mod input;

use tracing::{debug, info, warn};

use crate::domain::{RawSeries, SelectionIndex, WeekData};
use crate::metrics::{self, DerivedMetrics};
use crate::view::{self, ViewState};

pub use drag::{DragState, PointerDown};
pub use geometry::{Geometry, MarkerPosition};
pub use input::{nearest_stop, ScrubKey};

/// Lifecycle of the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// Nothing loaded yet, or a load is in flight.
    Loading,
    Ready {
        week: WeekData,
        index: SelectionIndex,
    },
    /// Missing or malformed series; the chart shows a static placeholder.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ChartScrubber {
    state: ChartState,
    geometry: Option<Geometry>,
    drag: DragState,
}

impl Default for ChartScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartScrubber {
    pub fn new() -> Self {
        Self {
            state: ChartState::Loading,
            geometry: None,
            drag: DragState::Idle,
        }
    }

    /// Validate and load both series, selecting the most recent day.
    ///
    /// Absent or malformed series put the chart in the error state and
    /// return `None`.
    pub fn initialize(
        &mut self,
        historical: Option<&RawSeries>,
        predicted: Option<&RawSeries>,
        previous_day_price: Option<f64>,
    ) -> Option<SelectionIndex> {
        match WeekData::try_new(historical, predicted, previous_day_price) {
            Ok(week) => Some(self.load(week)),
            Err(e) => {
                warn!(error = %e, "rejecting week series");
                self.fail(e.to_string());
                None
            }
        }
    }

    /// Load an already validated week.
    pub fn load(&mut self, week: WeekData) -> SelectionIndex {
        let index = SelectionIndex::LAST;
        info!(start = %week.date(SelectionIndex::FIRST), "week loaded");
        self.state = ChartState::Ready { week, index };
        self.drag = DragState::Idle;
        index
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.state = ChartState::Error(reason.into());
        self.drag = DragState::Idle;
    }

    /// Back to the loading state while a new week is fetched.
    pub fn begin_loading(&mut self) {
        self.state = ChartState::Loading;
        self.drag = DragState::Idle;
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn week(&self) -> Option<&WeekData> {
        match &self.state {
            ChartState::Ready { week, .. } => Some(week),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<SelectionIndex> {
        match &self.state {
            ChartState::Ready { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Select a day, clamping into range. Returns whether the day changed;
    /// re-selecting the current day is safe and reports `false`.
    pub fn set_selection(&mut self, index: i64) -> bool {
        let ChartState::Ready { index: current, .. } = &mut self.state else {
            debug!(index, "selection ignored, no week loaded");
            return false;
        };
        let next = SelectionIndex::clamped(index);
        if next == *current {
            return false;
        }
        debug!(from = %current, to = %next, "selection changed");
        *current = next;
        true
    }

    /// Snap a continuous track position to the nearest stop.
    pub fn handle_pointer_position(&mut self, fraction: f64) -> bool {
        match nearest_stop(fraction) {
            Some(index) => self.set_selection(index.get() as i64),
            None => {
                debug!(fraction, "ignoring non-finite pointer position");
                false
            }
        }
    }

    pub fn handle_key(&mut self, key: ScrubKey) -> bool {
        match self.selection() {
            Some(current) => self.set_selection(key.apply(current).get() as i64),
            None => false,
        }
    }

    /// Record the latest container widths. Never touches the selection.
    pub fn resize(&mut self, track_width: f64, plot_width: f64) {
        self.geometry = Some(Geometry::new(track_width, plot_width));
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Marker and guide placement for the current selection, or for the
    /// most recent day when nothing is loaded.
    pub fn marker_position(&self) -> MarkerPosition {
        let index = self.selection().unwrap_or_default();
        MarkerPosition::at(index, self.geometry.as_ref())
    }

    pub fn metrics(&self) -> Option<DerivedMetrics> {
        match &self.state {
            ChartState::Ready { week, index } => Some(metrics::compute(week, *index)),
            _ => None,
        }
    }

    pub fn view(&self) -> ViewState {
        match &self.state {
            ChartState::Loading => ViewState::Loading,
            ChartState::Error(reason) => ViewState::Error(reason.clone()),
            ChartState::Ready { week, index } => {
                let metrics = metrics::compute(week, *index);
                ViewState::Ready(Box::new(view::render(&metrics, &self.marker_position())))
            }
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pointer pressed at `offset` cells from the start of the track.
    pub fn pointer_down(&mut self, offset: f64) -> PointerDown {
        if self.selection().is_none() {
            return PointerDown::Ignored;
        }
        let Some(geometry) = self.geometry else {
            return PointerDown::Ignored;
        };
        let Some(fraction) = geometry.track_fraction(offset) else {
            return PointerDown::Ignored;
        };
        if offset < 0.0 || offset > geometry.track_width - 1.0 {
            return PointerDown::Ignored;
        }
        let on_handle = self
            .marker_position()
            .track_offset
            .is_some_and(|handle| drag::hits_handle(handle, offset, geometry.track_width));
        if on_handle {
            self.drag = DragState::Captured;
            PointerDown::Captured
        } else {
            self.handle_pointer_position(fraction);
            PointerDown::Jumped
        }
    }

    /// Pointer moved while held. Only a captured session consumes moves;
    /// positions past either end of the track clamp to the end stops.
    pub fn pointer_move(&mut self, offset: f64) -> bool {
        if !self.drag.is_captured() {
            return false;
        }
        let fraction = self.geometry.and_then(|g| g.track_fraction(offset));
        match fraction {
            Some(f) => self.handle_pointer_position(f),
            None => false,
        }
    }

    /// Pointer released anywhere. Always ends the session.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }
}
