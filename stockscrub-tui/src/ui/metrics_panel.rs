//! Metrics for the selected day: predicted vs actual price and change.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use stockscrub_core::view::{Field, ViewModel, ViewState};

use crate::app::AppState;
use crate::theme;

const LOADING_TEXT: &str = "Loading...";
const LABEL_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 12;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.scrubber.view();
    let (title, lines) = match &view {
        ViewState::Ready(view) => (
            format!(" {} ({}) ", view.date_label, view.date_iso),
            ready_lines(view),
        ),
        // Errors are reported on the chart; the panel keeps its loading text.
        ViewState::Loading | ViewState::Error(_) => (" Metrics ".to_string(), loading_lines()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border())
        .title(title)
        .title_style(theme::panel_title());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn row<'a>(label: &'a str, value: Span<'a>, change: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label:<LABEL_WIDTH$}"), theme::muted()),
        Span::styled(format!("{:<VALUE_WIDTH$}", value.content), value.style),
        change,
    ])
}

fn field(f: &Field) -> Span<'_> {
    Span::styled(f.text.as_str(), theme::tone(f.tone))
}

fn ready_lines(view: &ViewModel) -> Vec<Line<'_>> {
    vec![
        row("", Span::styled("Price", theme::muted()), Span::styled("Change", theme::muted())),
        row("Predicted", field(&view.predicted_price), field(&view.predicted_change)),
        row("Actual", field(&view.real_price), field(&view.real_change)),
        row("Difference", field(&view.difference), field(&view.difference_pct)),
        Line::from(""),
        Line::from(Span::styled(format!(" {}", view.baseline_label), theme::muted())),
    ]
}

fn loading_lines() -> Vec<Line<'static>> {
    let loading = || Span::styled(LOADING_TEXT, theme::muted());
    vec![
        row("", Span::styled("Price", theme::muted()), Span::styled("Change", theme::muted())),
        row("Predicted", loading(), loading()),
        row("Actual", loading(), loading()),
        row("Difference", loading(), loading()),
    ]
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::test_helpers::{loaded_app, test_app};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn latest_day_shows_unknown_actual() {
        let (app, _c, _r) = loaded_app();
        let ViewState::Ready(view) = app.scrubber.view() else {
            panic!("expected ready view");
        };
        let rendered = text(&ready_lines(&view));
        assert!(rendered.contains("Actual      N/A"));
        assert!(rendered.contains("Difference  N/A"));
        assert!(!rendered.contains("$0.00"));
    }

    #[test]
    fn earlier_day_shows_all_values() {
        let (mut app, _c, _r) = loaded_app();
        app.scrubber.set_selection(1);
        let ViewState::Ready(view) = app.scrubber.view() else {
            panic!("expected ready view");
        };
        let rendered = text(&ready_lines(&view));
        assert!(!rendered.contains("N/A"));
        assert!(rendered.contains("vs prior day"));
    }

    fn render_rows(app: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn error_state_keeps_loading_text() {
        let (mut app, _c, _r) = test_app();
        app.scrubber.fail("historical series is missing");
        assert!(matches!(app.scrubber.view(), ViewState::Error(_)));

        let rows = render_rows(&app, 50, 8);
        assert!(rows[0].contains(" Metrics "));
        for label in ["Predicted", "Actual", "Difference"] {
            let row = rows.iter().find(|r| r.contains(label)).unwrap();
            assert_eq!(row.matches(LOADING_TEXT).count(), 2, "{row}");
        }
        assert!(!rows.iter().any(|r| r.contains("historical series is missing")));
        assert!(!rows.iter().any(|r| r.contains("N/A")));
    }
}
