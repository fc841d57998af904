//! CLI error type.

use std::fmt;

use parkcheck::app::AppError;
use parkcheck::config::ConfigError;
use parkcheck::logging::LoggingError;

/// Errors surfaced to the user by `parkcheck` commands.
#[derive(Debug)]
pub enum CliError {
    /// Bad configuration or arguments.
    Config(String),
    /// Reading or writing the config file failed.
    ConfigFile(ConfigError),
    /// Logging could not be set up.
    Logging(LoggingError),
    /// The application could not be assembled.
    App(AppError),
    /// The Tokio runtime could not be created.
    Runtime(String),
    /// The HTTP server failed.
    Serve(String),
    /// A parking check failed.
    Check(String),
    /// Rendering or writing a map failed.
    Map(String),
    CacheClear(String),
    CacheStats(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::App(e) => write!(f, "{}", e),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
            CliError::Serve(msg) => write!(f, "Server error: {}", msg),
            CliError::Check(msg) => write!(f, "Check failed: {}", msg),
            CliError::Map(msg) => write!(f, "Map failed: {}", msg),
            CliError::CacheClear(msg) => write!(f, "Failed to clear cache: {}", msg),
            CliError::CacheStats(msg) => write!(f, "Failed to read cache statistics: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::App(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}
