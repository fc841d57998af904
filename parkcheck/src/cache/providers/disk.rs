//! On-disk tile store.
//!
//! Stores one file per key directly under the cache directory as
//! `{key}.png`. Writes go through a uniquely named temporary file followed by
//! a rename, so concurrent writers of the same key never expose a partially
//! written tile to readers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::cache::traits::{BoxFuture, Cache, ServiceCacheError};

/// File extension used for stored tiles.
const ENTRY_EXTENSION: &str = "png";

/// Monotonic counter for temporary file names.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// File count and total size of a disk cache directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskCacheStats {
    pub files: u64,
    pub bytes: u64,
}

/// Filesystem-backed cache provider.
#[derive(Debug, Clone)]
pub struct DiskCacheProvider {
    directory: PathBuf,
}

impl DiskCacheProvider {
    /// Opens (and creates if needed) a disk cache rooted at `directory`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceCacheError::Io` if the directory cannot be created.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, ServiceCacheError> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// Returns the cache directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Counts stored tiles and their total size.
    pub fn stats(&self) -> Result<DiskCacheStats, ServiceCacheError> {
        let mut stats = DiskCacheStats::default();
        for path in self.entry_files()? {
            let metadata = std::fs::metadata(&path)?;
            stats.files += 1;
            stats.bytes += metadata.len();
        }
        Ok(stats)
    }

    /// Removes every stored tile, returning what was removed.
    pub fn clear(&self) -> Result<DiskCacheStats, ServiceCacheError> {
        let mut removed = DiskCacheStats::default();
        for path in self.entry_files()? {
            let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    removed.files += 1;
                    removed.bytes += size;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>, ServiceCacheError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.directory)? {
            let path = entry?.path();
            let is_entry = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(ENTRY_EXTENSION);
            if is_entry {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Constructs the path for a key, rejecting keys that would escape the
    /// cache directory.
    fn entry_path(&self, key: &str) -> Result<PathBuf, ServiceCacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ServiceCacheError::InvalidKey(key.to_string()));
        }
        Ok(self.directory.join(format!("{}.{}", key, ENTRY_EXTENSION)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.directory
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), n))
    }
}

impl Cache for DiskCacheProvider {
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), ServiceCacheError>> {
        let path = self.entry_path(key);
        let temp = self.temp_path(key);
        Box::pin(async move {
            let path = path?;
            if let Err(e) = tokio::fs::write(&temp, &value).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(e.into());
            }
            if let Err(e) = tokio::fs::rename(&temp, &path).await {
                let _ = tokio::fs::remove_file(&temp).await;
                return Err(e.into());
            }
            debug!(path = %path.display(), bytes = value.len(), "Stored tile on disk");
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, ServiceCacheError>> {
        let path = self.entry_path(key);
        Box::pin(async move {
            match tokio::fs::read(path?).await {
                Ok(data) => Ok(Some(data)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>> {
        let path = self.entry_path(key);
        Box::pin(async move {
            match tokio::fs::remove_file(path?).await {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, ServiceCacheError>> {
        let path = self.entry_path(key);
        Box::pin(async move { Ok(tokio::fs::try_exists(path?).await?) })
    }

    fn name(&self) -> &str {
        "disk"
    }
}
