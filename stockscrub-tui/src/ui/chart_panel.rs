//! Week chart: actual closes, predicted closes and a vertical guide at the
//! selected day.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use stockscrub_core::domain::{SelectionIndex, WeekData};
use stockscrub_core::scrubber::ChartState;

use crate::app::{AppState, ScreenLayout};
use crate::theme;
use crate::ui::chart_block;

const GUIDE_SYMBOL: &str = "│";

pub fn render(f: &mut Frame, layout: &ScreenLayout, app: &AppState) {
    let title = format!(" {} · actual vs predicted [{}] ", app.ticker, app.source_name);
    f.render_widget(chart_block(&title), layout.chart);

    match app.scrubber.state() {
        ChartState::Loading => render_message(
            f,
            layout.plot,
            vec![Line::from(Span::styled(
                format!("Loading {}...", app.ticker),
                theme::muted(),
            ))],
        ),
        ChartState::Error(reason) => render_message(
            f,
            layout.plot,
            vec![
                Line::from(Span::styled("Error loading data", theme::negative())),
                Line::from(""),
                Line::from(Span::styled(reason.as_str(), theme::muted())),
            ],
        ),
        ChartState::Ready { week, .. } => {
            render_chart(f, layout.plot, week);
            if let Some(offset) = app.scrubber.marker_position().guide_offset {
                render_guide(f, layout.plot, offset);
            }
        }
    }
}

fn render_message(f: &mut Frame, area: Rect, mut lines: Vec<Line>) {
    let pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::from(""); pad];
    padded.append(&mut lines);
    f.render_widget(
        Paragraph::new(padded).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

/// Chart points as `(day index, price)`; unknown actual prices are skipped.
fn points(week: &WeekData) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let actual = SelectionIndex::all()
        .filter_map(|i| week.historical.price(i).known().map(|p| (i.get() as f64, p)))
        .collect();
    let predicted = SelectionIndex::all()
        .map(|i| (i.get() as f64, week.predicted.price(i)))
        .collect();
    (actual, predicted)
}

fn price_bounds(actual: &[(f64, f64)], predicted: &[(f64, f64)]) -> [f64; 2] {
    let (lo, hi) = actual
        .iter()
        .chain(predicted)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    let padding = ((hi - lo).abs() * 0.05).max(0.5);
    [lo - padding, hi + padding]
}

fn render_chart(f: &mut Frame, area: Rect, week: &WeekData) {
    let (actual, predicted) = points(week);
    let bounds = price_bounds(&actual, &predicted);

    let datasets = vec![
        Dataset::default()
            .name("actual")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::HISTORICAL))
            .graph_type(GraphType::Line)
            .data(&actual),
        Dataset::default()
            .name("predicted")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::PREDICTED))
            .graph_type(GraphType::Line)
            .data(&predicted),
    ];

    // No axis labels or legend: the graph must fill `area` so its columns
    // line up with the scrubber track below.
    let chart = Chart::new(datasets)
        .legend_position(None)
        .x_axis(Axis::default().bounds([0.0, 4.0]))
        .y_axis(Axis::default().bounds(bounds));
    f.render_widget(chart, area);
}

/// Vertical guide through the plot at `offset` cells from its left edge.
/// Drawn only into blank cells so the series lines stay visible.
fn render_guide(f: &mut Frame, area: Rect, offset: f64) {
    if area.width == 0 {
        return;
    }
    let column = (offset.round() as u16).min(area.width - 1);
    let x = area.x + column;
    let style = theme::accent().add_modifier(Modifier::DIM);
    let buf = f.buffer_mut();
    for y in area.top()..area.bottom() {
        if let Some(cell) = buf.cell_mut((x, y)) {
            if matches!(cell.symbol(), " " | "\u{2800}") {
                cell.set_symbol(GUIDE_SYMBOL).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::test_helpers::{loaded_app, test_app};
    use crate::ui::layout;

    fn guide_column(app: &mut AppState) -> Option<u16> {
        let mut terminal = Terminal::new(TestBackend::new(81, 30)).unwrap();
        let mut plot = Rect::default();
        terminal
            .draw(|f| {
                app.set_layout(layout(f.area()));
                plot = app.layout.plot;
                render(f, &app.layout, app);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (plot.left()..plot.right()).find(|&x| {
            (plot.top()..plot.bottom()).any(|y| buf[(x, y)].symbol() == GUIDE_SYMBOL)
        })
    }

    #[test]
    fn guide_follows_selection() {
        let (mut app, _c, _r) = loaded_app();
        let plot_width = layout(Rect::new(0, 0, 81, 30)).plot.width;
        let plot_x = layout(Rect::new(0, 0, 81, 30)).plot.x;

        app.scrubber.set_selection(0);
        assert_eq!(guide_column(&mut app), Some(plot_x));

        app.scrubber.set_selection(4);
        assert_eq!(guide_column(&mut app), Some(plot_x + plot_width - 1));
    }

    #[test]
    fn no_guide_while_loading() {
        let (mut app, _c, _r) = test_app();
        assert_eq!(guide_column(&mut app), None);
    }

    #[test]
    fn bounds_pad_flat_series() {
        let flat = [(0.0, 10.0), (1.0, 10.0)];
        let [lo, hi] = price_bounds(&flat, &flat);
        assert!(lo < 10.0 && hi > 10.0);
    }
}
