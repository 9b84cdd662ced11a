//! StockScrub Core: week series, the day scrubber, derived metrics, data sources.
//!
//! This crate contains everything that does not need a terminal:
//! - Domain types (validated week series, tri-state prices, selection index)
//! - ChartScrubber state machine (snapped selection, pointer capture, geometry)
//! - Derived comparison metrics and the pure view model
//! - Data providers (web backend, CSV files, built-in sample)
//! - TOML configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod metrics;
pub mod scrubber;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use domain::{PriceValue, RawSeries, SelectionIndex, Ticker, WeekData};
pub use metrics::DerivedMetrics;
pub use scrubber::{ChartScrubber, ChartState, ScrubKey};
pub use view::{ViewModel, ViewState};
