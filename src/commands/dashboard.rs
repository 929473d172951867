//! Dashboard command implementation
//!
//! This module implements the `dashboard` subcommand which fetches request
//! logs once on startup (and again on 'r') and charts them per request name.

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::FutureExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::task::JoinHandle;

use reqlog_dash::{
    config::{Config, DashboardConfig},
    dashboard::{DashboardAction, DashboardApp},
    logs::{FetchState, LogFetcher},
};

/// Execute the dashboard command
pub async fn execute(cfg: &Config) -> Result<()> {
    let fetcher = LogFetcher::new(&cfg.source)?;
    run_dashboard(fetcher, &cfg.dashboard).await
}

/// Run the dashboard event loop
async fn run_dashboard(fetcher: LogFetcher, dashboard_cfg: &DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear screen on startup
    terminal.clear()?;

    // Initialize state; loading starts as soon as the view is up
    let mut app = DashboardApp::new(dashboard_cfg, fetcher.url());
    let mut pending = Some(spawn_fetch(&mut app, &fetcher));

    // Main loop
    let result = loop {
        // Apply a settled fetch, if any
        if let Some(handle) = pending.as_mut() {
            if let Some(joined) = handle.now_or_never() {
                pending = None;
                match joined {
                    Ok(state) => app.apply(state),
                    Err(e) => app.apply(FetchState::Error(format!("Fetch task failed: {}", e))),
                }
            }
        }

        // Render UI
        if let Err(e) = terminal.draw(|f| app.render(f)) {
            break Err(e.into());
        }

        // Handle events with timeout; errors break so the terminal is restored
        match handle_event(&mut app, next_event(Duration::from_millis(100))) {
            LoopControl::Quit => break Ok(()),
            LoopControl::Fail(e) => break Err(e.into()),
            LoopControl::Refresh if pending.is_none() => {
                pending = Some(spawn_fetch(&mut app, &fetcher));
            }
            _ => {}
        }
    };

    // Restore terminal. An in-flight fetch is detached and its result dropped.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// What the event loop does after one poll
#[derive(Debug)]
enum LoopControl {
    Continue,
    Refresh,
    Quit,
    Fail(io::Error),
}

/// Wait up to `timeout` for a terminal event
fn next_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Route one polled event to the app
fn handle_event(app: &mut DashboardApp, polled: io::Result<Option<Event>>) -> LoopControl {
    match polled {
        Err(e) => LoopControl::Fail(e),
        Ok(Some(Event::Key(key))) => match app.handle_key(key) {
            DashboardAction::Quit => LoopControl::Quit,
            DashboardAction::Refresh => LoopControl::Refresh,
            DashboardAction::None => LoopControl::Continue,
        },
        Ok(_) => LoopControl::Continue,
    }
}

/// Move the app to `Loading` and run one fetch in the background
fn spawn_fetch(app: &mut DashboardApp, fetcher: &LogFetcher) -> JoinHandle<FetchState> {
    app.begin_loading();

    let fetcher = fetcher.clone();
    tokio::spawn(async move { FetchState::from(fetcher.fetch().await) })
}
