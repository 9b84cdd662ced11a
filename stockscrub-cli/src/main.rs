//! StockScrub CLI: inspect a ticker's week of predicted vs actual closes.
//!
//! Commands:
//! - `show`: metrics for every day of the week, one day highlighted
//! - `fetch`: dump both series in the backend's JSON shape
//! - `info`: describe the configured data source

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stockscrub_core::config::LoggingConfig;
use stockscrub_core::data::{
    provider_from_config, CsvProvider, DataSource, SeriesPayload, SeriesResponse, WeekFetch,
};
use stockscrub_core::domain::SelectionIndex;
use stockscrub_core::metrics::{self, DerivedMetrics};
use stockscrub_core::scrubber::{ChartScrubber, ChartState, MarkerPosition};
use stockscrub_core::view::{self, ViewModel};
use stockscrub_core::{AppConfig, Ticker};

#[derive(Parser)]
#[command(
    name = "stockscrub",
    about = "StockScrub CLI: weekly predicted vs actual closing prices"
)]
struct Cli {
    /// Config file. Defaults to <config dir>/stockscrub/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data source: http, csv or sample. Overrides the config file.
    #[arg(long, global = true)]
    source: Option<DataSource>,

    /// Directory with the two CSV files (implies --source csv).
    #[arg(long, global = true)]
    csv_dir: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show derived metrics for each day of the week.
    Show {
        /// Ticker symbol (e.g., AAPL).
        ticker: String,

        /// Day to highlight, 1 (oldest) to 5 (latest). Defaults to the latest.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        day: Option<u8>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch both series and print them as backend-style JSON.
    Fetch {
        /// Ticker symbol (e.g., AAPL).
        ticker: String,
    },
    /// Describe the configured data source.
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = if cli.config.is_some() {
        AppConfig::load(&config_path)?
    } else {
        AppConfig::load_or_default(&config_path)?
    };
    apply_overrides(&mut config, &cli);
    init_logging(&config.logging)?;
    debug!(config = %config_path.display(), source = %config.source.kind, "configuration loaded");

    match cli.command {
        Commands::Show { ticker, day, json } => run_show(&config, &ticker, day, json),
        Commands::Fetch { ticker } => run_fetch(&config, &ticker),
        Commands::Info => run_info(&config, &config_path),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockscrub")
        .join("config.toml")
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(dir) = &cli.csv_dir {
        config.source.csv_dir = dir.clone();
        config.source.kind = DataSource::Csv;
    }
    if let Some(source) = cli.source {
        config.source.kind = source;
    }
    if let Some(url) = &cli.base_url {
        config.backend.base_url = url.clone();
    }
}

/// Logs go to stderr so stdout stays clean for table and JSON output.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    ticker: &'a str,
    source: &'a str,
    selected: SelectionIndex,
    view: ViewModel,
    days: Vec<DerivedMetrics>,
}

fn run_show(config: &AppConfig, symbol: &str, day: Option<u8>, json: bool) -> Result<()> {
    let provider = provider_from_config(&config.source, &config.backend)?;
    let ticker = Ticker::parse(symbol)?;
    info!(%ticker, source = provider.name(), "fetching week");

    let fetch = WeekFetch::fetch(provider.as_ref(), &ticker);
    let historical = fetch
        .historical
        .with_context(|| format!("loading historical series for {ticker}"))?;
    let predicted = fetch
        .predicted
        .with_context(|| format!("loading predicted series for {ticker}"))?;

    let mut scrubber = ChartScrubber::new();
    scrubber.initialize(
        Some(&historical.series),
        Some(&predicted),
        historical.previous_day_price,
    );
    if let Some(day) = day {
        scrubber.set_selection(i64::from(day) - 1);
    }
    let (week, selected) = match scrubber.state() {
        ChartState::Ready { week, index } => (week, *index),
        ChartState::Error(reason) => bail!("{ticker}: {reason}"),
        ChartState::Loading => bail!("{ticker}: no data loaded"),
    };

    let days = metrics::compute_week(week);
    let view = view::render(&days[selected.get()], &MarkerPosition::at(selected, None));

    if json {
        let output = ShowOutput {
            ticker: ticker.as_str(),
            source: provider.name(),
            selected,
            view,
            days,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{ticker} ({})", provider.name());
    println!(
        "  {:<8} {:>10} {:>9} {:>10} {:>9} {:>10} {:>9}",
        "Day", "Predicted", "Change", "Actual", "Change", "Diff", "Diff %"
    );
    for m in &days {
        let v = view::render(m, &MarkerPosition::at(m.index, None));
        let cursor = if m.index == selected { ">" } else { " " };
        println!(
            "{cursor} {:<8} {:>10} {:>9} {:>10} {:>9} {:>10} {:>9}",
            v.date_label,
            v.predicted_price.text,
            v.predicted_change.text,
            v.real_price.text,
            v.real_change.text,
            v.difference.text,
            v.difference_pct.text,
        );
    }
    println!();
    println!("Selected {} ({}), {}", view.date_label, view.date_iso, view.baseline_label);
    Ok(())
}

#[derive(Serialize)]
struct FetchOutput {
    historical: SeriesResponse,
    predicted: SeriesResponse,
}

fn response(result: Result<SeriesPayload, String>) -> SeriesResponse {
    match result {
        Ok(payload) => SeriesResponse {
            success: true,
            data: Some(payload),
            error: None,
        },
        Err(error) => SeriesResponse {
            success: false,
            data: None,
            error: Some(error),
        },
    }
}

fn run_fetch(config: &AppConfig, symbol: &str) -> Result<()> {
    let provider = provider_from_config(&config.source, &config.backend)?;
    let ticker = Ticker::parse(symbol)?;
    let fetch = WeekFetch::fetch(provider.as_ref(), &ticker);

    let output = FetchOutput {
        historical: response(
            fetch
                .historical
                .map(|h| SeriesPayload::from_series(&ticker, &h.series, h.previous_day_price))
                .map_err(|e| e.to_string()),
        ),
        predicted: response(
            fetch
                .predicted
                .map(|p| SeriesPayload::from_series(&ticker, &p, None))
                .map_err(|e| e.to_string()),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_info(config: &AppConfig, config_path: &Path) -> Result<()> {
    let exists = if config_path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config: {}{exists}", config_path.display());
    println!("Source: {}", config.source.kind);

    match config.source.kind {
        DataSource::Http => {
            let base = config.backend.base_url.trim_end_matches('/');
            println!("  Base URL:   {base}");
            println!("  Historical: {base}{}", config.backend.historical_path);
            println!("  Predicted:  {base}{}", config.backend.predicted_path);
            println!("  Timeout:    {}s", config.backend.timeout_secs);
        }
        DataSource::Csv => {
            let info = CsvProvider::new(&config.source.csv_dir).info()?;
            for (label, file) in [("Historical", &info.historical), ("Predicted", &info.predicted)] {
                println!("  {label}: {}", file.path.display());
                if file.exists {
                    println!("    rows:    {}", file.rows);
                    println!("    tickers: {}", file.tickers.join(", "));
                } else {
                    println!("    (missing)");
                }
            }
        }
        DataSource::Sample => {
            println!("  Built-in sample week, any valid ticker");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn csv_dir_implies_csv_source() {
        let cli = Cli::parse_from(["stockscrub", "--csv-dir", "/tmp/data", "info"]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.source.kind, DataSource::Csv);
        assert_eq!(config.source.csv_dir, PathBuf::from("/tmp/data"));
    }

    #[test]
    fn explicit_source_wins() {
        let cli = Cli::parse_from([
            "stockscrub", "show", "AAPL", "--csv-dir", "/tmp", "--source", "sample",
        ]);
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.source.kind, DataSource::Sample);
    }

    #[test]
    fn day_must_be_in_week() {
        assert!(Cli::try_parse_from(["stockscrub", "show", "AAPL", "--day", "6"]).is_err());
        assert!(Cli::try_parse_from(["stockscrub", "show", "AAPL", "--day", "0"]).is_err());
        assert!(Cli::try_parse_from(["stockscrub", "show", "AAPL", "--day", "5"]).is_ok());
    }

    #[test]
    fn show_and_fetch_run_on_sample_data() {
        let mut config = AppConfig::default();
        config.source.kind = DataSource::Sample;
        run_show(&config, "aapl", Some(1), false).unwrap();
        run_show(&config, "aapl", None, true).unwrap();
        run_fetch(&config, "MSFT").unwrap();
    }

    #[test]
    fn invalid_ticker_fails() {
        let mut config = AppConfig::default();
        config.source.kind = DataSource::Sample;
        assert!(run_show(&config, "not a ticker", None, false).is_err());
    }
}
