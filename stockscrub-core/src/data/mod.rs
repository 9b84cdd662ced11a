//! Data sources for the two weekly series

pub mod csv_source;
pub mod http;
pub mod payload;
pub mod provider;
pub mod request;
pub mod sample;

pub use csv_source::{CsvFileInfo, CsvInfo, CsvProvider};
pub use http::BackendProvider;
pub use payload::{SeriesPayload, SeriesResponse};
pub use provider::{DataError, DataSource, HistoricalFetch, WeekFetch, WeekProvider};
pub use request::{RequestId, RequestTracker};
pub use sample::SampleProvider;

use crate::config::{BackendConfig, SourceConfig};

/// Build the provider selected in the configuration.
pub fn provider_from_config(
    source: &SourceConfig,
    backend: &BackendConfig,
) -> Result<Box<dyn WeekProvider>, DataError> {
    Ok(match source.kind {
        DataSource::Http => Box::new(BackendProvider::new(backend)?),
        DataSource::Csv => Box::new(CsvProvider::new(&source.csv_dir)),
        DataSource::Sample => Box::new(SampleProvider::new()),
    })
}
