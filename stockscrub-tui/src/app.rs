//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels and
//! every response is applied on the main thread, so the scrubber only ever
//! sees one writer.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use ratatui::layout::Rect;
use tracing::{debug, info};

use stockscrub_core::data::{DataError, RequestId, RequestTracker};
use stockscrub_core::scrubber::{ChartScrubber, ChartState};
use stockscrub_core::Ticker;

use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;
const RECENT_TICKERS_CAP: usize = 10;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Data,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Backend => "API",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

impl From<&DataError> for ErrorCategory {
    fn from(err: &DataError) -> Self {
        match err.category() {
            "network" => ErrorCategory::Network,
            "backend" => ErrorCategory::Backend,
            "data" => ErrorCategory::Data,
            "input" => ErrorCategory::Input,
            _ => ErrorCategory::Other,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    TickerPrompt,
    ErrorHistory,
}

/// Screen regions from the last layout pass. Mouse events are mapped
/// through `track`; the chart's guide line is drawn inside `plot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub chart: Rect,
    pub plot: Rect,
    pub track: Rect,
    pub labels: Rect,
    pub metrics: Rect,
    pub status: Rect,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    pub scrubber: ChartScrubber,
    pub ticker: Ticker,
    /// Most recent first.
    pub recent_tickers: Vec<Ticker>,
    pub requests: RequestTracker,
    pub discard_stale_responses: bool,
    pub source_name: String,
    pub layout: ScreenLayout,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub prompt_input: String,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        ticker: Ticker,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            running: true,
            scrubber: ChartScrubber::new(),
            ticker,
            recent_tickers: Vec::new(),
            requests: RequestTracker::new(),
            discard_stale_responses: true,
            source_name: source_name.into(),
            layout: ScreenLayout::default(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            prompt_input: String::new(),
        }
    }

    /// Ask the worker for `ticker`'s week. The chart shows the loading state
    /// until the matching response arrives.
    pub fn request_week(&mut self, ticker: Ticker) -> RequestId {
        let request_id = self.requests.next_id();
        info!(%request_id, %ticker, "requesting week");
        self.scrubber.begin_loading();
        self.set_status(format!("Loading {ticker}..."));
        let cmd = WorkerCommand::LoadWeek {
            request_id,
            ticker: ticker.clone(),
        };
        if self.worker_tx.send(cmd).is_err() {
            self.scrubber.fail("background worker is not running");
            self.push_error(
                ErrorCategory::Other,
                "background worker is not running".into(),
                ticker.to_string(),
            );
        }
        self.ticker = ticker;
        request_id
    }

    pub fn reload(&mut self) -> RequestId {
        self.request_week(self.ticker.clone())
    }

    /// Apply a worker response. Returns false when it was dropped as stale.
    pub fn handle_worker_response(&mut self, resp: WorkerResponse) -> bool {
        match resp {
            WorkerResponse::WeekLoaded {
                request_id,
                ticker,
                fetch,
            } => {
                if self.discard_stale_responses && !self.requests.is_current(request_id) {
                    debug!(%request_id, %ticker, "dropping stale response");
                    return false;
                }

                let (historical, predicted) = match (fetch.historical, fetch.predicted) {
                    (Ok(h), Ok(p)) => (h, p),
                    (Err(e), _) | (_, Err(e)) => {
                        self.scrubber.fail(e.to_string());
                        self.push_error((&e).into(), e.to_string(), ticker.to_string());
                        return true;
                    }
                };

                let loaded = self.scrubber.initialize(
                    Some(&historical.series),
                    Some(&predicted),
                    historical.previous_day_price,
                );
                if loaded.is_some() {
                    self.set_status(format!("Loaded {ticker}"));
                    self.remember(ticker);
                } else if let ChartState::Error(reason) = self.scrubber.state() {
                    let reason = reason.clone();
                    self.push_error(ErrorCategory::Data, reason, ticker.to_string());
                }
                true
            }
        }
    }

    /// Record a successfully loaded ticker at the front of the recents list.
    pub fn remember(&mut self, ticker: Ticker) {
        self.recent_tickers.retain(|t| *t != ticker);
        self.recent_tickers.insert(0, ticker);
        self.recent_tickers.truncate(RECENT_TICKERS_CAP);
    }

    /// Store the latest layout and hand the widths to the scrubber.
    pub fn set_layout(&mut self, layout: ScreenLayout) {
        if layout != self.layout {
            self.scrubber
                .resize(f64::from(layout.track.width), f64::from(layout.plot.width));
            self.layout = layout;
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_fetch, test_app};
    use stockscrub_core::data::WeekFetch;
    use stockscrub_core::domain::SelectionIndex;

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmds, _resps) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn request_sends_command_and_enters_loading() {
        let (mut app, cmds, _resps) = test_app();
        let id = app.request_week(ticker("MSFT"));
        assert_eq!(app.scrubber.state(), &ChartState::Loading);
        match cmds.try_recv().unwrap() {
            WorkerCommand::LoadWeek { request_id, ticker } => {
                assert_eq!(request_id, id);
                assert_eq!(ticker.as_str(), "MSFT");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn current_response_loads_latest_day() {
        let (mut app, _cmds, _resps) = test_app();
        let id = app.request_week(ticker("AAPL"));
        assert!(app.handle_worker_response(sample_fetch(id, "AAPL")));
        assert_eq!(app.scrubber.selection(), Some(SelectionIndex::LAST));
        assert_eq!(app.recent_tickers, vec![ticker("AAPL")]);
    }

    #[test]
    fn stale_response_is_dropped() {
        let (mut app, _cmds, _resps) = test_app();
        let first = app.request_week(ticker("AAPL"));
        let second = app.request_week(ticker("MSFT"));
        assert!(!app.handle_worker_response(sample_fetch(first, "AAPL")));
        assert_eq!(app.scrubber.state(), &ChartState::Loading);
        assert!(app.handle_worker_response(sample_fetch(second, "MSFT")));
        assert!(app.scrubber.selection().is_some());
    }

    #[test]
    fn stale_response_applies_when_guard_disabled() {
        let (mut app, _cmds, _resps) = test_app();
        app.discard_stale_responses = false;
        let first = app.request_week(ticker("AAPL"));
        app.request_week(ticker("MSFT"));
        assert!(app.handle_worker_response(sample_fetch(first, "AAPL")));
        assert!(app.scrubber.selection().is_some());
    }

    #[test]
    fn fetch_error_puts_chart_in_error_state() {
        let (mut app, _cmds, _resps) = test_app();
        let id = app.request_week(ticker("ZZZZ"));
        let resp = WorkerResponse::WeekLoaded {
            request_id: id,
            ticker: ticker("ZZZZ"),
            fetch: WeekFetch {
                historical: Err(DataError::TickerNotFound {
                    ticker: "ZZZZ".into(),
                }),
                predicted: Err(DataError::TickerNotFound {
                    ticker: "ZZZZ".into(),
                }),
            },
        };
        app.handle_worker_response(resp);
        assert!(matches!(app.scrubber.state(), ChartState::Error(_)));
        assert_eq!(app.error_history[0].category, ErrorCategory::Backend);
        assert!(app.recent_tickers.is_empty());
    }

    #[test]
    fn short_series_is_a_data_error() {
        let (mut app, _cmds, _resps) = test_app();
        let id = app.request_week(ticker("AAPL"));
        let WorkerResponse::WeekLoaded { fetch, .. } = sample_fetch(id, "AAPL");
        let mut historical = fetch.historical.unwrap();
        historical.series.dates.truncate(4);
        historical.series.prices.truncate(4);
        let resp = WorkerResponse::WeekLoaded {
            request_id: id,
            ticker: ticker("AAPL"),
            fetch: WeekFetch {
                historical: Ok(historical),
                predicted: fetch.predicted,
            },
        };
        app.handle_worker_response(resp);
        assert!(matches!(app.scrubber.state(), ChartState::Error(_)));
        assert_eq!(app.error_history[0].category, ErrorCategory::Data);
    }

    #[test]
    fn recents_are_deduplicated_and_capped() {
        let (mut app, _cmds, _resps) = test_app();
        for s in ["A", "B", "C", "A"] {
            app.remember(ticker(s));
        }
        let names: Vec<&str> = app.recent_tickers.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
        for i in 0..20 {
            app.remember(ticker(&format!("T{i}")));
        }
        assert_eq!(app.recent_tickers.len(), 10);
    }

    #[test]
    fn layout_feeds_scrubber_widths() {
        let (mut app, _cmds, _resps) = test_app();
        let layout = ScreenLayout {
            track: Rect::new(1, 10, 41, 1),
            plot: Rect::new(1, 1, 81, 8),
            ..ScreenLayout::default()
        };
        app.set_layout(layout);
        let geometry = app.scrubber.geometry().unwrap();
        assert_eq!(geometry.track_width, 41.0);
        assert_eq!(geometry.plot_width, 81.0);
    }
}
