//! CSV provider: the files the backend serves the weekly endpoints from.
//!
//! Layout: `{dir}/historical_closing_prices.csv` and
//! `{dir}/predicted_prices_5days.csv`, each with a `Date` column followed by
//! one column per ticker. The last five rows form the week. Empty and `nan`
//! cells are missing prices.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::provider::{DataError, HistoricalFetch, WeekProvider};
use crate::domain::{RawSeries, Ticker, WEEK_LEN};

pub const HISTORICAL_FILE: &str = "historical_closing_prices.csv";
pub const PREDICTED_FILE: &str = "predicted_prices_5days.csv";

const DATE_COLUMN: &str = "Date";
const INFO_TICKER_LIMIT: usize = 10;

pub struct CsvProvider {
    dir: PathBuf,
}

/// One ticker column read from a CSV file, oldest row first.
#[derive(Debug, Clone, PartialEq)]
struct Column {
    dates: Vec<NaiveDate>,
    prices: Vec<Option<f64>>,
}

/// Summary of one CSV file.
#[derive(Debug, Clone, Serialize)]
pub struct CsvFileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub rows: usize,
    /// First few ticker columns.
    pub tickers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub historical: CsvFileInfo,
    pub predicted: CsvFileInfo,
}

fn csv_error(path: &Path, message: impl Into<String>) -> DataError {
    DataError::Csv {
        path: path.display().to_string(),
        message: message.into(),
    }
}

fn parse_cell(path: &Path, row: usize, cell: &str) -> Result<Option<f64>, DataError> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| csv_error(path, format!("row {row}: '{cell}' is not a number")))
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_column(&self, file: &str, ticker: &Ticker) -> Result<Column, DataError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(csv_error(&path, "file not found"));
        }
        let mut reader = csv::Reader::from_path(&path).map_err(|e| csv_error(&path, e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| csv_error(&path, e.to_string()))?
            .clone();

        let date_idx = headers
            .iter()
            .position(|h| h.trim() == DATE_COLUMN)
            .ok_or_else(|| csv_error(&path, "no Date column"))?;
        let ticker_idx = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(ticker.as_str()))
            .ok_or_else(|| DataError::TickerNotFound {
                ticker: ticker.to_string(),
            })?;

        let mut column = Column {
            dates: Vec::new(),
            prices: Vec::new(),
        };
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| csv_error(&path, e.to_string()))?;
            let date_cell = record.get(date_idx).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|e| {
                csv_error(&path, format!("row {row}: invalid date '{date_cell}': {e}"))
            })?;
            column.dates.push(date);
            column
                .prices
                .push(parse_cell(&path, row, record.get(ticker_idx).unwrap_or_default())?);
        }
        debug!(path = %path.display(), rows = column.dates.len(), %ticker, "read CSV column");
        Ok(column)
    }

    fn file_info(&self, file: &str) -> Result<CsvFileInfo, DataError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(CsvFileInfo {
                path,
                exists: false,
                rows: 0,
                tickers: Vec::new(),
            });
        }
        let mut reader = csv::Reader::from_path(&path).map_err(|e| csv_error(&path, e.to_string()))?;
        let tickers = reader
            .headers()
            .map_err(|e| csv_error(&path, e.to_string()))?
            .iter()
            .filter(|h| h.trim() != DATE_COLUMN)
            .take(INFO_TICKER_LIMIT)
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = 0;
        for record in reader.records() {
            record.map_err(|e| csv_error(&path, e.to_string()))?;
            rows += 1;
        }
        Ok(CsvFileInfo {
            path,
            exists: true,
            rows,
            tickers,
        })
    }

    /// Path, existence, row count and leading ticker columns of both files.
    pub fn info(&self) -> Result<CsvInfo, DataError> {
        Ok(CsvInfo {
            historical: self.file_info(HISTORICAL_FILE)?,
            predicted: self.file_info(PREDICTED_FILE)?,
        })
    }
}

/// Last `WEEK_LEN` rows of a column.
fn tail(column: &Column) -> RawSeries {
    let start = column.dates.len().saturating_sub(WEEK_LEN);
    RawSeries::new(column.dates[start..].to_vec(), column.prices[start..].to_vec())
}

impl WeekProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    /// The row just before the week, when present, supplies the previous close.
    fn fetch_historical(&self, ticker: &Ticker) -> Result<HistoricalFetch, DataError> {
        let column = self.read_column(HISTORICAL_FILE, ticker)?;
        let previous_day_price = column
            .prices
            .len()
            .checked_sub(WEEK_LEN + 1)
            .and_then(|i| column.prices[i]);
        Ok(HistoricalFetch {
            series: tail(&column),
            previous_day_price,
        })
    }

    fn fetch_predicted(&self, ticker: &Ticker) -> Result<RawSeries, DataError> {
        let column = self.read_column(PREDICTED_FILE, ticker)?;
        Ok(tail(&column))
    }
}
