//! Top-level UI layout: chart, scrubber, metrics panel and status bar.

pub mod chart_panel;
pub mod metrics_panel;
pub mod overlays;
pub mod scrubber_bar;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Overlay, ScreenLayout};
use crate::theme;

const METRICS_HEIGHT: u16 = 8;
const SCRUBBER_HEIGHT: u16 = 2;

/// Split the terminal into the app's regions.
///
/// The plot (inside the chart border) and the scrubber track share the same
/// left edge and width, so a stop's column on the track is also its column
/// in the chart.
pub fn layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(SCRUBBER_HEIGHT),
            Constraint::Length(METRICS_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let chart = chunks[0];
    let plot = chart_block("").inner(chart);
    let scrubber = chunks[1];
    let track = Rect {
        x: plot.x,
        y: scrubber.y,
        width: plot.width,
        height: scrubber.height.min(1),
    };
    let labels = Rect {
        y: scrubber.y.saturating_add(1),
        height: scrubber.height.saturating_sub(1),
        ..track
    };

    ScreenLayout {
        chart,
        plot,
        track,
        labels,
        metrics: chunks[2],
        status: chunks[3],
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let layout = app.layout;

    chart_panel::render(f, &layout, app);
    scrubber_bar::render(f, &layout, app);
    metrics_panel::render(f, layout.metrics, app);
    status_bar::render(f, layout.status, app);

    let main_area = Rect {
        height: f.area().height.saturating_sub(layout.status.height),
        ..f.area()
    };
    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::TickerPrompt => overlays::render_ticker_prompt(f, main_area, app),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Bordered block shared by the chart and the layout computation.
pub fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border())
        .title(title)
        .title_style(theme::panel_title())
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::test_helpers::{loaded_app, test_app};

    /// Flatten the rendered buffer into text for substring checks.
    pub(crate) fn render_text(app: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                app.set_layout(layout(f.area()));
                draw(f, app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn track_and_plot_share_columns() {
        let l = layout(Rect::new(0, 0, 100, 30));
        assert_eq!(l.track.x, l.plot.x);
        assert_eq!(l.track.width, l.plot.width);
        assert_eq!(l.labels.y, l.track.y + 1);
        assert_eq!(l.status.height, 1);
        assert_eq!(l.metrics.height, METRICS_HEIGHT);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (mut app, _c, _r) = loaded_app();
        let _ = render_text(&mut app, 10, 5);
        let _ = render_text(&mut app, 1, 1);
    }

    #[test]
    fn loading_screen() {
        let (mut app, _c, _r) = test_app();
        let text = render_text(&mut app, 100, 30);
        assert!(text.contains("Loading"));
    }

    #[test]
    fn loaded_screen_shows_latest_day() {
        let (mut app, _c, _r) = loaded_app();
        let text = render_text(&mut app, 100, 30);
        assert!(text.contains("Aug 22"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn overlays_render_on_top() {
        let (mut app, _c, _r) = loaded_app();
        app.overlay = Overlay::Help;
        assert!(render_text(&mut app, 100, 30).contains("Keys"));
        app.overlay = Overlay::ErrorHistory;
        assert!(render_text(&mut app, 100, 30).contains("No errors recorded"));
        app.overlay = Overlay::TickerPrompt;
        app.prompt_input = "msft".into();
        assert!(render_text(&mut app, 100, 30).contains("msft"));
    }
}
