//! Forget and clear command implementations

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use refix_cache::{Cache, CacheStore};
use tracing::info;

use super::require_cache;

pub fn run_forget(cache_path: &Path, keys: &[String]) -> Result<bool> {
    let mut cache = require_cache(cache_path)?;

    let mut missing = false;
    for key in keys {
        if cache.get(key).is_some() {
            cache.clear(key);
            println!("forgot {}", key);
        } else {
            missing = true;
            println!("not cached {}", key);
        }
    }

    CacheStore::new(cache_path).save(&cache).into_diagnostic()?;
    Ok(missing)
}

pub fn run_clear(cache_path: &Path) -> Result<bool> {
    let removed = CacheStore::new(cache_path).remove().into_diagnostic()?;
    if removed {
        info!("Removed {}", cache_path.display());
    } else {
        info!("No cache at {}", cache_path.display());
    }
    Ok(false)
}
