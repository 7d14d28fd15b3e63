//! Hospital management console
//!
//! A terminal UI application giving admins, doctors, and patients dashboards
//! over the clinic backend, with cached reads and an optional demo fallback
//! when the backend is unreachable.

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use hms_console::api::ApiClient;
use hms_console::app::{App, AppState};
use hms_console::cli::{Cli, StartupConfig};
use hms_console::session::SessionStore;
use hms_console::ui;

/// Environment variable holding the tracing filter; logging is off without it
const LOG_ENV_VAR: &str = "HMS_LOG";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Initializes tracing to a log file when HMS_LOG is set.
///
/// Stdout belongs to the TUI, so traces go to `hms-console.log` in the cache
/// directory. HMS_LOG holds the filter directive (e.g. `debug`).
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) else {
        return;
    };
    let Some(project_dirs) = ProjectDirs::from("", "", "hms-console") else {
        return;
    };
    if std::fs::create_dir_all(project_dirs.cache_dir()).is_err() {
        return;
    }
    let log_path = project_dirs.cache_dir().join("hms-console.log");
    let Ok(file) = std::fs::File::options().append(true).create(true).open(log_path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Login => ui::render_login(frame, app),
        AppState::Dashboard => ui::render_dashboard(frame, app),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    let session = Arc::new(SessionStore::new().unwrap_or_else(SessionStore::in_memory));
    let client = ApiClient::new(config.base_url.clone(), session, config.fallback);
    let mut app = App::new(client, config.initial_role);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        // Run any action the last keypress requested
        if app.login_requested {
            app.login_requested = false;
            terminal.draw(|f| render_ui(f, &app))?;
            app.perform_login().await;
        }
        if app.logout_requested {
            app.logout_requested = false;
            app.perform_logout().await;
        }
        if app.refresh_requested {
            app.refresh_requested = false;
            app.loading = true;
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_all().await;
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
