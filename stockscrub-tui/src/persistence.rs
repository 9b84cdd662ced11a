//! App state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use stockscrub_core::Ticker;

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_ticker: Option<String>,
    pub recent_tickers: Vec<String>,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState. The startup ticker is the most
/// recent one that loaded, so a failed lookup is not reopened next session.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_ticker: app.recent_tickers.first().map(|t| t.to_string()),
        recent_tickers: app.recent_tickers.iter().map(|t| t.to_string()).collect(),
    }
}

/// The ticker to open with: the last one viewed, if it still parses.
pub fn last_ticker(state: &PersistedState) -> Option<Ticker> {
    state
        .last_ticker
        .as_deref()
        .and_then(|s| Ticker::parse(s).ok())
}

/// Apply persisted state to AppState. Entries that no longer parse as
/// tickers are dropped.
pub fn apply(app: &mut AppState, state: PersistedState) {
    for symbol in state.recent_tickers.iter().rev() {
        if let Ok(ticker) = Ticker::parse(symbol) {
            app.remember(ticker);
        }
    }
}
