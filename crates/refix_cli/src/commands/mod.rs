//! Subcommand implementations

pub mod check;
pub mod forget;
pub mod show;
pub mod status;

use std::path::Path;

use miette::Result;
use refix_cache::{CacheStore, ColdStart, FileCache, Loaded};

/// Loads the cache at `path`, failing with a readable message when there is
/// nothing usable.
pub(crate) fn require_cache(path: &Path) -> Result<FileCache> {
    match CacheStore::new(path).load() {
        Loaded::Restored(cache) => Ok(cache),
        Loaded::Cold(reason) => Err(miette::miette!(
            "No usable cache at {}: {}",
            path.display(),
            describe_cold(&reason)
        )),
    }
}

pub(crate) fn describe_cold(reason: &ColdStart) -> String {
    match reason {
        ColdStart::Missing => "file does not exist".to_string(),
        ColdStart::Malformed(e) => e.to_string(),
        ColdStart::Unreadable(e) => e.to_string(),
    }
}
