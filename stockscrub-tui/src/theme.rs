//! Parrot/neon palette and style helpers.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (handle, guide line, focus)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (alerts)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, unknown values)

use ratatui::style::{Color, Modifier, Style};

use stockscrub_core::view::Tone;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

/// Series colors on the chart.
pub const HISTORICAL: Color = Color::Rgb(0, 255, 128);
pub const PREDICTED: Color = Color::Rgb(147, 112, 219);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn panel_border() -> Style {
    Style::default().fg(ACCENT)
}

pub fn panel_title() -> Style {
    accent_bold()
}

/// Style for a metrics field. Unknown values are dimmed, never colored as a
/// gain or loss.
pub fn tone(tone: Tone) -> Style {
    match tone {
        Tone::Positive => positive(),
        Tone::Negative => negative(),
        Tone::Neutral => text(),
        Tone::Unknown => muted().add_modifier(Modifier::DIM),
    }
}
