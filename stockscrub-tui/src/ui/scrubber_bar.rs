//! Scrubber track under the chart: five stop ticks, the handle and a date
//! label per stop.

use ratatui::Frame;
use ratatui::style::Modifier;

use stockscrub_core::domain::{SelectionIndex, STOP_POSITIONS};
use stockscrub_core::scrubber::DragState;
use stockscrub_core::view::day_labels;

use crate::app::{AppState, ScreenLayout};
use crate::theme;

const TRACK: char = '─';
const TICK: char = '┼';
const HANDLE: char = '●';
const HANDLE_DRAGGING: char = '◉';

/// Column of each stop on a track `width` cells wide.
pub fn stop_columns(width: u16) -> [u16; 5] {
    let span = f64::from(width.saturating_sub(1));
    STOP_POSITIONS.map(|p| (p * span).round() as u16)
}

/// Track text: rule, ticks at the stops, and the handle on top.
pub fn track_text(width: u16, handle: Option<u16>, dragging: bool) -> String {
    let stops = stop_columns(width);
    (0..width)
        .map(|x| {
            if handle == Some(x) {
                if dragging { HANDLE_DRAGGING } else { HANDLE }
            } else if stops.contains(&x) {
                TICK
            } else {
                TRACK
            }
        })
        .collect()
}

/// Where each label starts so it is centered on its stop but stays on the
/// track. Returns `None` when the labels would overlap.
pub fn label_starts(width: u16, labels: &[String]) -> Option<Vec<u16>> {
    let stops = stop_columns(width);
    let mut starts = Vec::with_capacity(labels.len());
    let mut next_free = 0u16;
    for (label, stop) in labels.iter().zip(stops) {
        let len = label.chars().count() as u16;
        if len > width {
            return None;
        }
        let start = stop.saturating_sub(len / 2).min(width - len);
        if start < next_free {
            return None;
        }
        next_free = start + len + 1;
        starts.push(start);
    }
    Some(starts)
}

pub fn render(f: &mut Frame, layout: &ScreenLayout, app: &AppState) {
    let track = layout.track;
    if track.width == 0 || track.height == 0 {
        return;
    }

    let marker = app.scrubber.marker_position();
    let loaded = app.scrubber.selection().is_some();
    let handle = if loaded {
        marker
            .track_offset
            .map(|o| (o.round() as u16).min(track.width - 1))
    } else {
        None
    };
    let dragging = app.scrubber.drag_state() == DragState::Captured;
    let track_style = if loaded { theme::neutral() } else { theme::muted() };

    let buf = f.buffer_mut();
    buf.set_string(
        track.x,
        track.y,
        track_text(track.width, handle, dragging),
        track_style,
    );
    if let Some(h) = handle {
        if let Some(cell) = buf.cell_mut((track.x + h, track.y)) {
            cell.set_style(theme::accent_bold());
        }
    }

    let labels_area = layout.labels;
    let Some(week) = app.scrubber.week() else {
        return;
    };
    if labels_area.height == 0 {
        return;
    }
    let labels = day_labels(week);
    let selected = marker.index;
    match label_starts(labels_area.width, &labels) {
        Some(starts) => {
            for (i, (label, start)) in labels.iter().zip(starts).enumerate() {
                let style = if SelectionIndex::try_from(i).ok() == Some(selected) {
                    theme::accent_bold()
                } else {
                    theme::muted()
                };
                buf.set_string(labels_area.x + start, labels_area.y, label, style);
            }
        }
        None => {
            // Too narrow for all five; show the selected day only.
            let label = &labels[selected.get()];
            buf.set_string(
                labels_area.x,
                labels_area.y,
                label,
                theme::accent_bold().add_modifier(Modifier::UNDERLINED),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["Aug 18", "Aug 19", "Aug 20", "Aug 21", "Aug 22"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn stops_span_the_track() {
        assert_eq!(stop_columns(41), [0, 10, 20, 30, 40]);
        assert_eq!(stop_columns(1), [0; 5]);
    }

    #[test]
    fn handle_replaces_tick() {
        let text = track_text(9, Some(4), false);
        assert_eq!(text, "┼─┼─●─┼─┼");
        assert_eq!(track_text(9, Some(8), true).chars().last(), Some(HANDLE_DRAGGING));
    }

    #[test]
    fn labels_stay_on_track_when_wide() {
        let starts = label_starts(81, &labels()).unwrap();
        assert_eq!(starts[0], 0);
        assert_eq!(*starts.last().unwrap(), 81 - 6);
        assert!(starts.windows(2).all(|w| w[0] + 6 < w[1]));
    }

    #[test]
    fn narrow_track_drops_labels() {
        assert!(label_starts(20, &labels()).is_none());
    }
}
