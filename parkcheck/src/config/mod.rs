//! Configuration file support.
//!
//! Settings live in an INI file at `{config_dir}/parkcheck/config.ini`:
//!
//! ```ini
//! [server]
//! bind = 0.0.0.0:8080
//! request_timeout = 30
//!
//! [geodata]
//! endpoint = https://overpass-api.de/api/interpreter
//! timeout = 30
//!
//! [tiles]
//! url = https://tile.openstreetmap.org
//! timeout = 30
//! parallel = 8
//!
//! [cache]
//! enabled = true
//! backend = disk
//! memory_size = 256MB
//!
//! [logging]
//! level = info
//! ```
//!
//! A missing file means all defaults.

mod file;
mod keys;
mod size;

pub use file::{
    config_file_path, default_cache_directory, CacheBackendKind, CacheSettings, ConfigError,
    ConfigFile, GeodataSettings, LoggingSettings, ServerSettings, TileSettings,
    DEFAULT_MEMORY_CACHE_SIZE, DEFAULT_PORT,
};
pub use keys::ConfigKey;
pub use size::{format_size, parse_size};
