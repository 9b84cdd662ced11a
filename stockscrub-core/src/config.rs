//! TOML configuration.
//!
//! Every key is optional; a missing file means all defaults.
//!
//! ```toml
//! [source]
//! kind = "csv"            # http | csv | sample
//! csv_dir = "ml_pipeline/data"
//!
//! [backend]
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 10
//!
//! [ui]
//! default_ticker = "AAPL"
//! discard_stale_responses = true
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::DataSource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: DataSource,
    /// Directory holding the two CSV files for `kind = "csv"`.
    pub csv_dir: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: DataSource::Http,
            csv_dir: PathBuf::from("ml_pipeline/data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Path templates; `{ticker}` is replaced with the symbol.
    pub historical_path: String,
    pub predicted_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_secs: 10,
            historical_path: "/api/weekly-historical/{ticker}".into(),
            predicted_path: "/api/weekly-predictions/{ticker}".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_ticker: String,
    /// Drop responses to loads that were superseded by a newer load.
    pub discard_stale_responses: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_ticker: "AAPL".into(),
            discard_stale_responses: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Log file for the TUI. Defaults to the platform data directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load `path` if it exists, otherwise return defaults. A file that
    /// exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("", "test").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.source.kind, DataSource::Http);
        assert!(config.ui.discard_stale_responses);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            "[source]\nkind = \"csv\"\n\n[backend]\ntimeout_secs = 3\n",
            "test",
        )
        .unwrap();
        assert_eq!(config.source.kind, DataSource::Csv);
        assert_eq!(config.source.csv_dir, PathBuf::from("ml_pipeline/data"));
        assert_eq!(config.backend.timeout_secs, 3);
        assert_eq!(config.backend.historical_path, "/api/weekly-historical/{ticker}");
    }

    #[test]
    fn unknown_source_kind_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[source]\nkind = \"ftp\"\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/stockscrub.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ndefault_ticker = \"MSFT\"\n").unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.ui.default_ticker, "MSFT");
    }
}
