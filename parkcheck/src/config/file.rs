//! `config.ini` model, loading and saving.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use super::keys::ConfigKey;
use crate::geodata::DEFAULT_OVERPASS_ENDPOINT;
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, OSM_BASE_URL};
use crate::render::DEFAULT_MAX_CONCURRENT_FETCHES;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default memory cache budget (256 MB).
pub const DEFAULT_MEMORY_CACHE_SIZE: u64 = 256 * 1024 * 1024;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// Path of the user's config file: `{config_dir}/parkcheck/config.ini`.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parkcheck")
        .join("config.ini")
}

/// Default tile cache directory: `{cache_dir}/parkcheck/tiles`.
pub fn default_cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parkcheck")
        .join("tiles")
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Per-request deadline in seconds.
    pub request_timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            request_timeout: 30,
        }
    }
}

/// `[geodata]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeodataSettings {
    pub endpoint: String,
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for GeodataSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// `[tiles]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSettings {
    pub url: String,
    pub timeout: u64,
    /// Tiles loaded concurrently per map.
    pub parallel: usize,
    pub user_agent: String,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            url: OSM_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            parallel: DEFAULT_MAX_CONCURRENT_FETCHES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Tile store backend selected in `[cache] backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackendKind {
    #[default]
    Disk,
    Memory,
}

impl CacheBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackendKind::Disk => "disk",
            CacheBackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for CacheBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheBackendKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "disk" => Ok(CacheBackendKind::Disk),
            "memory" => Ok(CacheBackendKind::Memory),
            _ => Err(()),
        }
    }
}

/// `[cache]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub enabled: bool,
    pub backend: CacheBackendKind,
    pub directory: PathBuf,
    pub memory_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackendKind::Disk,
            directory: default_cache_directory(),
            memory_size: DEFAULT_MEMORY_CACHE_SIZE,
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// When set, logs are also written to a daily file in this directory.
    pub directory: Option<PathBuf>,
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: "info".to_string(),
        }
    }
}

/// Contents of `config.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub server: ServerSettings,
    pub geodata: GeodataSettings,
    pub tiles: TileSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Loads the user's config file, falling back to defaults when it does
    /// not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads `path`, falling back to defaults when it does not exist.
    ///
    /// Unknown sections and keys are ignored. Keys that are present but
    /// empty keep their default.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses INI text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()))
                .map(str::trim);

            match value {
                Some(v) if !v.is_empty() => key.set(&mut config, v)?,
                _ => {}
            }
        }

        Ok(config)
    }

    /// Writes the config to the user's config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        Ok(())
    }

    /// INI representation. Unset optional values are omitted.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();

        assert_eq!(config.server.bind.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout, 30);
        assert_eq!(config.geodata.endpoint, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.tiles.url, "https://tile.openstreetmap.org");
        assert_eq!(config.tiles.parallel, 8);
        assert!(config.tiles.user_agent.starts_with("parkcheck/"));
        assert!(config.cache.enabled);
        assert_eq!(config.cache.backend, CacheBackendKind::Disk);
        assert!(config.cache.directory.ends_with("parkcheck/tiles"));
        assert_eq!(config.cache.memory_size, 256 * 1024 * 1024);
        assert!(config.logging.directory.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = ConfigFile::parse(
            "[server]\nbind = 127.0.0.1:3000\n\n[tiles]\nparallel = 4\nurl = http://tiles.local\n\n[cache]\nbackend = memory\nmemory_size = 64MB\n\n[unknown]\nfoo = bar\n",
        )
        .unwrap();

        assert_eq!(config.server.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.tiles.parallel, 4);
        assert_eq!(config.tiles.url, "http://tiles.local");
        assert_eq!(config.cache.backend, CacheBackendKind::Memory);
        assert_eq!(config.cache.memory_size, 64 * 1024 * 1024);
        assert_eq!(config.geodata, GeodataSettings::default());
    }

    #[test]
    fn test_parse_empty_value_keeps_default() {
        let config = ConfigFile::parse("[logging]\ndirectory =\nlevel =\n").unwrap();
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_parse_invalid_value() {
        let result = ConfigFile::parse("[server]\nrequest_timeout = never\n");
        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "server.request_timeout"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.server.request_timeout = 12;
        config.cache.enabled = false;
        config.logging.directory = Some(dir.path().join("logs"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
