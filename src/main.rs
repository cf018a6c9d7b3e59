// shopview - product catalog browser for the terminal
//
// Loads products from a JSON API and shows them in a sortable, filterable,
// paginated table with selection and expandable detail rows.
//
// Architecture:
// - Catalog: HTTP source, load orchestration, progress timer
// - Table: client-side view state and cell rendering
// - TUI (ratatui): event loop, components, modals
// - Headless: one page printed to stdout
// - Event system: an mpsc channel carries load results to the UI loop

mod catalog;
mod cli;
mod config;
mod headless;
mod logging;
mod notify;
mod table;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ListArgs};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Boxed layer over the registry, so the branches below share one type
type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

/// Initialize tracing
///
/// In TUI mode logs go to the in-memory buffer (the alternate screen can't
/// take stray writes); in headless mode they go to stderr. File logging, when
/// enabled, writes JSON alongside either.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("shopview={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if tui_mode {
        layers.push(TuiLogLayer::new(log_buffer.clone()).boxed());
    } else {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    }

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let mut guard = None;
    if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };

                // Writes happen on a background thread
                let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .boxed(),
                );
                guard = Some(file_guard);
            }
            Err(e) => {
                // Fall back to non-file logging
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // config --show / --path / --reset exit early
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    // `list` is always headless; otherwise the flag or env decides
    let list_args = match cli.command {
        Some(Commands::List(args)) => Some(args),
        _ if cli.no_tui || !config.enable_tui => Some(ListArgs {
            page: 1,
            ..ListArgs::default()
        }),
        _ => None,
    };

    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config, list_args.is_none(), &log_buffer);

    tracing::debug!("Configuration loaded: {:?}", config);

    match list_args {
        Some(args) => headless::run_list(&config, &args).await,
        None => tui::run_tui(config, log_buffer).await,
    }
}
