// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, load events)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::catalog::{HttpProductSource, LoadEvent, LoadKind, Loader, LoaderOptions, ProductSource};
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use theme::Theme;
use tokio::sync::mpsc;

/// Redraw period for spinners, progress linger and toast expiry
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI
///
/// Sets up the terminal, kicks off the first load, runs the event loop and
/// restores the terminal when done, even if the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let source = HttpProductSource::new(&config).context("Failed to build HTTP client")?;
    let (load_tx, mut load_rx) = mpsc::channel(64);
    let loader = Loader::new(
        Arc::new(source),
        load_tx,
        LoaderOptions {
            limit: config.fetch_limit,
            progress_interval: config.progress_interval(),
        },
    );
    let mut app = App::new(
        loader,
        config.page_size,
        Theme::by_name(&config.theme),
        log_buffer,
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.start_load(LoadKind::Reload);

    let result = run_event_loop(&mut terminal, &mut app, &mut load_rx).await;

    // Stop timers and in-flight fetches before leaving
    app.shutdown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources at once:
/// 1. Keyboard input
/// 2. Timer ticks (spinner, progress linger, toast expiry)
/// 3. Load events from the fetch and progress tasks
async fn run_event_loop<S: ProductSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    load_rx: &mut mpsc::Receiver<LoadEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        input::handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(load_event) = load_rx.recv() => {
                app.on_load_event(load_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
