//! On-disk location of a persisted cache.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{Cache, CacheError, FileCache, codec};

/// Default cache file, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".refix.cache";

/// Result of loading a persisted cache.
#[derive(Debug)]
pub enum Loaded {
    /// A previously persisted cache was decoded.
    Restored(FileCache),
    /// Nothing usable was found; the run starts cold.
    Cold(ColdStart),
}

/// Why a load produced no usable cache.
#[derive(Debug)]
pub enum ColdStart {
    /// No cache file exists yet.
    Missing,
    /// The file exists but could not be decoded.
    Malformed(CacheError),
    /// The file could not be read.
    Unreadable(CacheError),
}

impl Loaded {
    /// Returns the restored cache, if any.
    pub fn into_cache(self) -> Option<FileCache> {
        match self {
            Loaded::Restored(cache) => Some(cache),
            Loaded::Cold(_) => None,
        }
    }
}

/// Reads and writes a [`FileCache`] at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store for the given cache file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cache from disk.
    ///
    /// Never fails: a missing, unreadable or malformed file yields
    /// [`Loaded::Cold`] with the reason.
    pub fn load(&self) -> Loaded {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache file found at {}", self.path.display());
                return Loaded::Cold(ColdStart::Missing);
            }
            Err(e) => {
                return Loaded::Cold(ColdStart::Unreadable(CacheError::read(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                ))));
            }
        };

        match codec::decode(&content) {
            Ok(cache) => {
                info!(
                    "Loaded {} cache entries from {}",
                    cache.len(),
                    self.path.display()
                );
                Loaded::Restored(cache)
            }
            Err(e) => {
                debug!("Discarding cache at {}: {}", self.path.display(), e);
                Loaded::Cold(ColdStart::Malformed(e))
            }
        }
    }

    /// Saves the cache to disk.
    ///
    /// Writes to a uniquely named temporary file in the target directory,
    /// then renames it over the target so readers never observe a partially
    /// written blob. The temporary file is removed if anything fails.
    pub fn save(&self, cache: &FileCache) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let bytes = codec::encode(cache)?;
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| CacheError::write(format!("{}: {}", dir.display(), e)))?;
        tmp.write_all(&bytes)
            .map_err(|e| CacheError::write(format!("{}: {}", tmp.path().display(), e)))?;
        tmp.persist(&self.path)
            .map_err(|e| CacheError::write(format!("{}: {}", self.path.display(), e.error)))?;

        info!(
            "Saved {} cache entries to {}",
            cache.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Deletes the cache file.
    ///
    /// Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool, CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}
