//! Logging setup.
//!
//! Installs a `tracing` subscriber with a stderr layer and, when a log
//! directory is configured, a daily-rolling file layer. The filter comes from
//! `RUST_LOG` when set, otherwise from the configured level.

use std::path::Path;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;

/// File name prefix for rolled log files.
pub const LOG_FILE_PREFIX: &str = "parkcheck.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{0}'")]
    Filter(String),

    #[error("Failed to install logger: {0}")]
    Init(String),
}

/// Keeps the background file writer alive. Dropping it flushes pending
/// log lines.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(settings: &LoggingSettings, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        settings.level.clone()
    }
}

fn build_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|_| LoggingError::Filter(directive.to_string())),
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if the log directory cannot be created, the level is not a valid
/// filter, or a subscriber is already installed.
pub fn init_logging(
    settings: &LoggingSettings,
    verbose: bool,
) -> Result<LoggingGuard, LoggingError> {
    let filter = build_filter(&default_directive(settings, verbose))?;

    let console = fmt::layer()
        .with_timer(LocalTime::new(Rfc3339))
        .with_target(true)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let (writer, guard) = file_writer(directory)?;
            let layer = fmt::layer()
                .with_timer(LocalTime::new(Rfc3339))
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard { _file: guard })
}

fn file_writer(
    directory: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), LoggingError> {
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::Directory {
        path: directory.display().to_string(),
        source,
    })?;
    let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}
