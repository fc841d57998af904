//! Cache management CLI commands.

use std::path::Path;

use clap::Subcommand;
use parkcheck::cache::{DiskCacheProvider, ServiceCacheError};
use parkcheck::config::{format_size, ConfigFile};

use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Clear the disk tile cache
    Clear,
    /// Show disk tile cache statistics
    Stats,
}

/// Run a cache subcommand.
pub fn run(config: &ConfigFile, action: CacheAction) -> Result<(), CliError> {
    let cache_dir = &config.cache.directory;

    match action {
        CacheAction::Clear => {
            println!("Clearing disk cache at: {}", cache_dir.display());
            if !cache_dir.exists() {
                println!("Nothing to clear.");
                return Ok(());
            }

            let removed = open(cache_dir)
                .and_then(|provider| provider.clear())
                .map_err(|e| CliError::CacheClear(e.to_string()))?;
            println!(
                "Deleted {} files, freed {}",
                removed.files,
                format_size(removed.bytes)
            );
            Ok(())
        }
        CacheAction::Stats => {
            println!("Disk cache: {}", cache_dir.display());
            if !cache_dir.exists() {
                println!("  (empty)");
                return Ok(());
            }

            let stats = open(cache_dir)
                .and_then(|provider| provider.stats())
                .map_err(|e| CliError::CacheStats(e.to_string()))?;
            println!("  Files: {}", stats.files);
            println!("  Size:  {}", format_size(stats.bytes));
            Ok(())
        }
    }
}

fn open(directory: &Path) -> Result<DiskCacheProvider, ServiceCacheError> {
    DiskCacheProvider::open(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(directory: &Path) -> ConfigFile {
        let mut config = ConfigFile::default();
        config.cache.directory = directory.to_path_buf();
        config
    }

    #[test]
    fn test_clear_removes_cached_tiles() {
        let dir = TempDir::new().unwrap();
        let tiles = dir.path().join("tiles");
        std::fs::create_dir_all(&tiles).unwrap();
        std::fs::write(tiles.join("16_1_2.png"), b"tile").unwrap();
        std::fs::write(tiles.join("16_1_3.png"), b"tile").unwrap();

        assert_eq!(open(&tiles).unwrap().stats().unwrap().files, 2);

        let config = config_for(&tiles);
        run(&config, CacheAction::Stats).unwrap();
        run(&config, CacheAction::Clear).unwrap();

        let stats = open(&tiles).unwrap().stats().unwrap();
        assert_eq!(stats.files, 0);
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir.path().join("absent"));

        run(&config, CacheAction::Stats).unwrap();
        run(&config, CacheAction::Clear).unwrap();
        assert!(!dir.path().join("absent").exists());
    }
}
