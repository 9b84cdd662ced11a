//! StockScrub TUI entry point.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tracing::{error, info};

use stockscrub_core::data::provider_from_config;
use stockscrub_core::{AppConfig, Ticker};
use stockscrub_tui::app::AppState;
use stockscrub_tui::worker::{self, WorkerCommand};
use stockscrub_tui::{input, logging, persistence, ui};

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockscrub")
}

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_path = app_dir().join("config.toml");
    let state_path = app_dir().join("state.json");

    let config = AppConfig::load_or_default(&config_path)?;
    let log_path = logging::init_logging(&config.logging)?;
    info!(config = %config_path.display(), log = %log_path.display(), "starting");

    // Load persisted state
    let persisted = persistence::load(&state_path);
    let ticker = match persistence::last_ticker(&persisted) {
        Some(t) => t,
        None => Ticker::parse(&config.ui.default_ticker)
            .with_context(|| format!("invalid ui.default_ticker {:?}", config.ui.default_ticker))?,
    };

    // Worker channels
    let provider = provider_from_config(&config.source, &config.backend)?;
    let source_name = provider.name().to_string();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(provider, cmd_rx, resp_tx)?;

    // Build app state
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, ticker, source_name);
    app.discard_stale_responses = config.ui.discard_stale_responses;
    persistence::apply(&mut app, persisted);
    app.reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        error!(error = %e, "failed to save state");
    }

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render; every frame refreshes the track and plot widths.
        terminal.draw(|f| {
            app.set_layout(ui::layout(f.area()));
            ui::draw(f, app);
        })?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Resize(width, height) => {
                    app.set_layout(ui::layout(Rect::new(0, 0, width, height)));
                }
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
