//! meetdesk - a terminal console for track meet and roster management.
//!
//! Keyboard-driven editor for meets, their per-gender events and entries,
//! and the athlete roster, backed by the team's REST service.

mod app;
mod forms;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meetdesk_core::config::API_URL_ENV;
use meetdesk_core::{ApiClient, Config};

use app::{App, AppState, Command};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "meetdesk.log";

/// Initialize the tracing subscriber.
///
/// The terminal belongs to the UI, so logs go to a daily rolling file.
/// Use RUST_LOG to control the level (e.g., RUST_LOG=meetdesk_core=debug).
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if std::fs::create_dir_all(log_dir).is_err() {
        return None;
    }
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

/// Fall back to defaults when the config file cannot be read. The error is
/// handed back so it can be reported once logging is up.
fn config_or_default(loaded: Result<Config>) -> (Config, Option<anyhow::Error>) {
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--version") => {
            println!("meetdesk {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--check") => return check_backend().await,
        _ => {}
    }

    let (config, load_error) = config_or_default(Config::load());
    let _guard = config.log_dir().ok().and_then(|dir| init_tracing(&dir));
    info!("meetdesk starting");
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let mut app = App::new(config).context("Failed to create API client")?;
    app.queue(Command::Initialize);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = app.save_config() {
        warn!(error = %e, "Failed to save config");
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("meetdesk shutting down");
    Ok(())
}

/// Ping the backend's health endpoint and report the result.
async fn check_backend() -> Result<()> {
    let (config, load_error) = config_or_default(Config::load());
    if let Some(e) = load_error {
        eprintln!("warning: {:#}; using default config", e);
    }
    let base_url = config.base_url(std::env::var(API_URL_ENV).ok());
    let client = ApiClient::new(&base_url, config.timeout_secs())
        .with_context(|| format!("Invalid backend URL {}", base_url))?;

    match client.health().await {
        Ok(()) => {
            println!("ok: {}", base_url);
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {}: {}", base_url, e.user_message());
            std::process::exit(1);
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Run a queued command, showing its loading text while it is in flight
        if let Some(command) = app.take_pending() {
            app.status_message = Some(command.loading_text().to_string());
            terminal.draw(|f| render(f, app))?;
            app.execute(command).await;
            continue;
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
