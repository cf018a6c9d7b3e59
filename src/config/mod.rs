//! Configuration for the product browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/shopview/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

mod observability;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_API_URL: &str = "https://dummyjson.com/products";
const DEFAULT_FETCH_LIMIT: u32 = 100;
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 200;
const DEFAULT_THEME: &str = "dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Products endpoint
    pub api_url: String,

    /// Row-count limit sent with every request
    pub fetch_limit: u32,

    /// Rows per table page
    pub page_size: usize,

    /// HTTP timeout (0 = wait forever)
    pub request_timeout_secs: u64,

    /// Period of the cosmetic progress timer
    pub progress_interval_ms: u64,

    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    /// Run the TUI (false = print one page and exit)
    pub enable_tui: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            theme: DEFAULT_THEME.to_string(),
            enable_tui: true,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub fetch_limit: Option<u32>,
    pub page_size: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub progress_interval_ms: Option<u64>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/shopview/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("shopview").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        // Ignore errors - config is optional
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but can't be read
    /// or parsed is an error: silently falling back to defaults would have
    /// the user debugging the wrong thing.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file {}", path.display())),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed config file with an environment lookup
    ///
    /// Zero limits and page sizes are treated as unset.
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // API URL: env > file > default
        let api_url = env("SHOPVIEW_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Fetch limit: env > file > default
        let fetch_limit = env("SHOPVIEW_FETCH_LIMIT")
            .and_then(|v| v.parse().ok())
            .or(file.fetch_limit)
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_FETCH_LIMIT);

        // Page size: env > file > default
        let page_size = env("SHOPVIEW_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        // Theme: env > file > default
        let theme = env("SHOPVIEW_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("SHOPVIEW_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        Self {
            api_url,
            fetch_limit,
            page_size,
            request_timeout_secs: file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            progress_interval_ms: file
                .progress_interval_ms
                .filter(|&ms| ms > 0)
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL_MS),
            theme,
            enable_tui,
            logging: LoggingConfig::from_file(file.logging),
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# shopview configuration

# Products endpoint (must answer with {{ "products": [...] }})
api_url = "{api_url}"

# Row-count limit sent with each request
fetch_limit = {fetch_limit}

# Rows per table page
page_size = {page_size}

# HTTP timeout in seconds (0 = no timeout)
request_timeout_secs = {timeout}

# Progress bar update period while loading
progress_interval_ms = {progress}

# Theme: dark, light, nord
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_rotation = "{rotation}"
file_prefix = "{prefix}"
"#,
            api_url = self.api_url,
            fetch_limit = self.fetch_limit,
            page_size = self.page_size,
            timeout = self.request_timeout_secs,
            progress = self.progress_interval_ms,
            theme = self.theme,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            rotation = self.logging.file_rotation.as_str(),
            prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("Could not determine config path")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(&path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
