//! StockScrub TUI: week chart with a draggable day scrubber.
//!
//! One screen:
//! 1. Chart: actual and predicted closes with a guide at the selected day
//! 2. Scrubber: five-stop track with a handle and date labels
//! 3. Metrics: predicted vs actual price and change for the selected day
//! 4. Status bar: key hints and the last message

pub mod app;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;

#[cfg(test)]
mod test_helpers;
