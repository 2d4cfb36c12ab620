//! Check command implementation

use std::fs;
use std::path::{Path, PathBuf};

use miette::Result;
use refix_cache::{Cache, CacheStore, checksum};
use refix_core::{RUNTIME_VERSION, RunConfig, cache_is_usable, file_key};
use tracing::{info, warn};

pub fn run_check(cache_path: &Path, config: &RunConfig, paths: &[PathBuf]) -> Result<bool> {
    let cache = CacheStore::new(cache_path)
        .load()
        .into_cache()
        .filter(|cache| {
            cache_is_usable(cache, RUNTIME_VERSION, config.linting, &config.rules)
        });

    if cache.is_none() {
        info!("No usable cache; every file would be reprocessed");
    }

    let mut dirty = 0;
    for path in paths {
        let key = file_key(path, config.base_dir.as_deref());
        let fresh = match fs::read(path) {
            Ok(content) => cache
                .as_ref()
                .is_some_and(|cache| cache.is_fresh(&key, checksum(&content))),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                false
            }
        };

        if fresh {
            println!("fresh  {}", key);
        } else {
            dirty += 1;
            println!("dirty  {}", key);
        }
    }

    Ok(dirty > 0)
}
