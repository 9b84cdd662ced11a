//! Domain types for StockScrub

pub mod price;
pub mod selection;
pub mod series;
pub mod ticker;

pub use price::{Direction, PriceValue};
pub use selection::{SelectionIndex, STOP_POSITIONS};
pub use series::{
    HistoricalSeries, PredictedSeries, RawSeries, SeriesError, SeriesKind, WeekData, WEEK_LEN,
};
pub use ticker::{Ticker, TickerError};
