//! Addressable configuration keys (`section.key`).
//!
//! Every setting in `config.ini` has a [`ConfigKey`]. Loading the INI file,
//! `config get` and `config set` all go through [`ConfigKey::get`] and
//! [`ConfigKey::set`], so parsing and validation live in one place.

use std::path::PathBuf;
use std::str::FromStr;

use super::file::{CacheBackendKind, ConfigError, ConfigFile};
use super::size::{format_size, parse_size};

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ServerBind,
    ServerRequestTimeout,
    GeodataEndpoint,
    GeodataTimeout,
    GeodataUserAgent,
    TilesUrl,
    TilesTimeout,
    TilesParallel,
    TilesUserAgent,
    CacheEnabled,
    CacheBackend,
    CacheDirectory,
    CacheMemorySize,
    LoggingDirectory,
    LoggingLevel,
}

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ServerBind,
            ConfigKey::ServerRequestTimeout,
            ConfigKey::GeodataEndpoint,
            ConfigKey::GeodataTimeout,
            ConfigKey::GeodataUserAgent,
            ConfigKey::TilesUrl,
            ConfigKey::TilesTimeout,
            ConfigKey::TilesParallel,
            ConfigKey::TilesUserAgent,
            ConfigKey::CacheEnabled,
            ConfigKey::CacheBackend,
            ConfigKey::CacheDirectory,
            ConfigKey::CacheMemorySize,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ServerBind | ConfigKey::ServerRequestTimeout => "server",
            ConfigKey::GeodataEndpoint
            | ConfigKey::GeodataTimeout
            | ConfigKey::GeodataUserAgent => "geodata",
            ConfigKey::TilesUrl
            | ConfigKey::TilesTimeout
            | ConfigKey::TilesParallel
            | ConfigKey::TilesUserAgent => "tiles",
            ConfigKey::CacheEnabled
            | ConfigKey::CacheBackend
            | ConfigKey::CacheDirectory
            | ConfigKey::CacheMemorySize => "cache",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ServerBind => "bind",
            ConfigKey::ServerRequestTimeout => "request_timeout",
            ConfigKey::GeodataEndpoint => "endpoint",
            ConfigKey::GeodataTimeout | ConfigKey::TilesTimeout => "timeout",
            ConfigKey::GeodataUserAgent | ConfigKey::TilesUserAgent => "user_agent",
            ConfigKey::TilesUrl => "url",
            ConfigKey::TilesParallel => "parallel",
            ConfigKey::CacheEnabled => "enabled",
            ConfigKey::CacheBackend => "backend",
            ConfigKey::CacheDirectory | ConfigKey::LoggingDirectory => "directory",
            ConfigKey::CacheMemorySize => "memory_size",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full name, `section.key`.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as it would be written to the INI file. Unset optional
    /// values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ServerBind => config.server.bind.to_string(),
            ConfigKey::ServerRequestTimeout => config.server.request_timeout.to_string(),
            ConfigKey::GeodataEndpoint => config.geodata.endpoint.clone(),
            ConfigKey::GeodataTimeout => config.geodata.timeout.to_string(),
            ConfigKey::GeodataUserAgent => config.geodata.user_agent.clone(),
            ConfigKey::TilesUrl => config.tiles.url.clone(),
            ConfigKey::TilesTimeout => config.tiles.timeout.to_string(),
            ConfigKey::TilesParallel => config.tiles.parallel.to_string(),
            ConfigKey::TilesUserAgent => config.tiles.user_agent.clone(),
            ConfigKey::CacheEnabled => config.cache.enabled.to_string(),
            ConfigKey::CacheBackend => config.cache.backend.as_str().to_string(),
            ConfigKey::CacheDirectory => config.cache.directory.display().to_string(),
            ConfigKey::CacheMemorySize => format_size(config.cache.memory_size),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Parses `value` and stores it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ServerBind => {
                config.server.bind = value
                    .parse()
                    .map_err(|_| self.invalid(value, "expected host:port"))?
            }
            ConfigKey::ServerRequestTimeout => {
                config.server.request_timeout = self.positive(value)?
            }
            ConfigKey::GeodataEndpoint => config.geodata.endpoint = self.non_empty(value)?,
            ConfigKey::GeodataTimeout => config.geodata.timeout = self.positive(value)?,
            ConfigKey::GeodataUserAgent => config.geodata.user_agent = self.non_empty(value)?,
            ConfigKey::TilesUrl => config.tiles.url = self.non_empty(value)?,
            ConfigKey::TilesTimeout => config.tiles.timeout = self.positive(value)?,
            ConfigKey::TilesParallel => config.tiles.parallel = self.positive(value)? as usize,
            ConfigKey::TilesUserAgent => config.tiles.user_agent = self.non_empty(value)?,
            ConfigKey::CacheEnabled => {
                config.cache.enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(self.invalid(value, "expected true or false")),
                }
            }
            ConfigKey::CacheBackend => {
                config.cache.backend = value
                    .parse::<CacheBackendKind>()
                    .map_err(|_| self.invalid(value, "expected disk or memory"))?
            }
            ConfigKey::CacheDirectory => {
                config.cache.directory = PathBuf::from(self.non_empty(value)?)
            }
            ConfigKey::CacheMemorySize => {
                config.cache.memory_size = parse_size(value)
                    .ok_or_else(|| self.invalid(value, "expected a size such as 256MB"))?
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            ConfigKey::LoggingLevel => config.logging.level = self.non_empty(value)?,
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn positive(&self, value: &str) -> Result<u64, ConfigError> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.invalid(value, "expected a positive integer")),
        }
    }

    fn non_empty(&self, value: &str) -> Result<String, ConfigError> {
        if value.is_empty() {
            Err(self.invalid(value, "value must not be empty"))
        } else {
            Ok(value.to_string())
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
