//! Background worker thread: all network and file IO runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands
//! are handled one at a time in arrival order; there is no cancellation, so
//! the UI tags every load with a `RequestId` and decides on arrival whether
//! the answer is still wanted.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use stockscrub_core::data::{RequestId, WeekFetch, WeekProvider};
use stockscrub_core::Ticker;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadWeek { request_id: RequestId, ticker: Ticker },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    WeekLoaded {
        request_id: RequestId,
        ticker: Ticker,
        fetch: WeekFetch,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: Box<dyn WeekProvider>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stockscrub-worker".into())
        .spawn(move || worker_loop(provider.as_ref(), rx, tx))
}

fn worker_loop(
    provider: &dyn WeekProvider,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    info!(source = provider.name(), "worker started");
    // A closed command channel means the UI is gone.
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCommand::LoadWeek { request_id, ticker } => {
                debug!(%request_id, %ticker, "loading week");
                let fetch = WeekFetch::fetch(provider, &ticker);
                if let Some(err) = fetch.error() {
                    warn!(%request_id, %ticker, error = %err, "fetch failed");
                }
                let resp = WorkerResponse::WeekLoaded {
                    request_id,
                    ticker,
                    fetch,
                };
                if tx.send(resp).is_err() {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
    info!("worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    use stockscrub_core::data::SampleProvider;

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(Box::new(SampleProvider::new()), cmd_rx, resp_tx).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_exits_when_ui_drops_sender() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(Box::new(SampleProvider::new()), cmd_rx, resp_tx).unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }

    #[test]
    fn responses_keep_request_order_and_ids() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(Box::new(SampleProvider::new()), cmd_rx, resp_tx).unwrap();

        for (id, symbol) in [(1, "AAPL"), (2, "MSFT")] {
            cmd_tx
                .send(WorkerCommand::LoadWeek {
                    request_id: RequestId(id),
                    ticker: Ticker::parse(symbol).unwrap(),
                })
                .unwrap();
        }

        for expected in [1, 2] {
            let WorkerResponse::WeekLoaded {
                request_id, fetch, ..
            } = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(request_id, RequestId(expected));
            assert!(fetch.error().is_none());
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
