//! Logging for wiki-search-builder
//!
//! Thin layer over `tracing`:
//! - console output on stderr, optionally JSON
//! - daily-rolling log file through a non-blocking writer
//! - component-tagged helpers (`info("API", ...)`) used across the crate

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::prelude::*;

static FILE_GUARD: OnceCell<Option<WorkerGuard>> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the rolling log file. `None` disables file output.
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub level: LogLevel,
    pub enable_console_output: bool,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            file_prefix: "wiki-search.log".to_string(),
            level: LogLevel::Warn,
            enable_console_output: true,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Map a `-v` count onto a level, starting from `base`.
    pub fn raised_by(self, verbosity: u8) -> Self {
        let rank = match self {
            LogLevel::Error => 0u8,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
        };
        match rank.saturating_add(verbosity) {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Initialize logging with default configuration
pub fn initialize_logging() -> anyhow::Result<()> {
    initialize_logging_with_config(LogConfig::default())
}

/// Initialize logging with custom configuration.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn initialize_logging_with_config(config: LogConfig) -> anyhow::Result<()> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    let level = config.level.filter();

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(ChronoUtc::rfc_3339())
                .with_filter(level);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = config.enable_console_output.then(|| {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoUtc::rfc_3339())
            .with_target(false);
        if config.json {
            layer.json().with_filter(level).boxed()
        } else {
            layer.with_filter(level).boxed()
        }
    });

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .is_ok();

    let _ = FILE_GUARD.set(guard);

    if installed {
        info("LOGGER", "Logging system initialized", Some(config.level.as_str()));
    }

    Ok(())
}

/// Log a debug message
pub fn debug(component: &str, message: &str, details: Option<&str>) {
    match details {
        Some(details) => tracing::debug!(component, details, "{}", message),
        None => tracing::debug!(component, "{}", message),
    }
}

/// Log an info message
pub fn info(component: &str, message: &str, details: Option<&str>) {
    match details {
        Some(details) => tracing::info!(component, details, "{}", message),
        None => tracing::info!(component, "{}", message),
    }
}

/// Log a warning message
pub fn warn(component: &str, message: &str, details: Option<&str>) {
    match details {
        Some(details) => tracing::warn!(component, details, "{}", message),
        None => tracing::warn!(component, "{}", message),
    }
}

/// Log an error message
pub fn error(component: &str, message: &str, details: Option<&str>) {
    match details {
        Some(details) => tracing::error!(component, details, "{}", message),
        None => tracing::error!(component, "{}", message),
    }
}

/// Database-specific logging functions
pub mod database {
    use super::*;
    use std::path::Path;

    pub fn connection_attempt(db_path: &Path) {
        debug("DATABASE", &format!("Opening database at {}", db_path.display()), None);
    }

    pub fn connection_error(db_path: &Path, error_msg: &str) {
        error(
            "DATABASE",
            &format!("Database connection failed to {}", db_path.display()),
            Some(error_msg),
        );
    }

    pub fn table_creation(table_name: &str, success: bool) {
        if success {
            debug("DATABASE", &format!("Table '{}' ready", table_name), None);
        } else {
            error("DATABASE", &format!("Failed to create table '{}'", table_name), None);
        }
    }

    pub fn migration(from_version: u32, to_version: u32) {
        warn(
            "DATABASE",
            &format!("Schema version mismatch, recreating: v{} -> v{}", from_version, to_version),
            None,
        );
    }
}

/// Wikipedia API logging functions
pub mod api {
    use super::*;

    pub fn request(kind: &str, lang: &str, subject: &str) {
        debug("API", &format!("{} request on {}.wikipedia.org", kind, lang), Some(subject));
    }

    pub fn cache_hit(kind: &str, subject: &str) {
        debug("API", &format!("{} served from cache", kind), Some(subject));
    }

    pub fn failure(kind: &str, subject: &str, error_msg: &str) {
        error("API", &format!("{} failed for '{}'", kind, subject), Some(error_msg));
    }
}
