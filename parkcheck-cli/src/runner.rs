//! Shared setup for commands that talk to upstream services.

use std::path::{Path, PathBuf};

use parkcheck::app::{AppConfig, ParkCheckApp};
use parkcheck::config::{config_file_path, ConfigFile};
use parkcheck::logging::{init_logging, LoggingGuard};
use tokio::runtime::Runtime;
use tracing::info;

use crate::error::CliError;

/// Loads configuration, installs logging and builds the application.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _logging: LoggingGuard,
}

impl CliRunner {
    /// Loads `config_path` (or the default config file) and starts logging.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = resolve_config_path(config_path);
        let config = ConfigFile::load_from(&config_path)?;
        let logging = init_logging(&config.logging, verbose)?;

        Ok(Self {
            config,
            config_path,
            _logging: logging,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn log_startup(&self, command: &str) {
        info!(
            version = parkcheck::VERSION,
            command,
            config = %self.config_path.display(),
            "parkcheck starting"
        );
    }

    /// Builds the application from `config`, usually a copy of
    /// [`Self::config`] with command-line overrides applied.
    pub fn build_app(&self, config: &ConfigFile) -> Result<ParkCheckApp, CliError> {
        Ok(ParkCheckApp::build(AppConfig::from_config_file(config))?)
    }

    pub fn runtime(&self) -> Result<Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))
    }
}

/// `--config` if given, otherwise the per-user config file.
pub fn resolve_config_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}
