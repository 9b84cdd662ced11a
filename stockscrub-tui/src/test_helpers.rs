//! Test helpers for building app state without a terminal or worker thread.

use std::sync::mpsc::{self, Receiver, Sender};

use stockscrub_core::data::{RequestId, SampleProvider, WeekFetch};
use stockscrub_core::Ticker;

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// App with both channel ends kept alive by the caller.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, Ticker::parse("AAPL").unwrap(), "sample");
    (app, cmd_rx, resp_tx)
}

/// What the worker would answer for `symbol` from the sample source.
pub fn sample_fetch(request_id: RequestId, symbol: &str) -> WorkerResponse {
    let ticker = Ticker::parse(symbol).unwrap();
    let fetch = WeekFetch::fetch(&SampleProvider::new(), &ticker);
    WorkerResponse::WeekLoaded {
        request_id,
        ticker,
        fetch,
    }
}

/// App with the sample AAPL week already loaded.
pub fn loaded_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (mut app, cmds, resps) = test_app();
    let id = app.reload();
    app.handle_worker_response(sample_fetch(id, "AAPL"));
    let _ = cmds.try_recv();
    (app, cmds, resps)
}
