//! Status command implementation

use std::path::Path;

use miette::Result;
use refix_cache::{Cache, CacheStore, FileCache, Loaded};
use refix_core::{RUNTIME_VERSION, RunConfig};

use super::describe_cold;

pub fn run_status(cache_path: &Path, config: &RunConfig) -> Result<bool> {
    let cache = match CacheStore::new(cache_path).load() {
        Loaded::Restored(cache) => cache,
        Loaded::Cold(reason) => {
            println!("cold: {}", describe_cold(&reason));
            return Ok(true);
        }
    };

    let drift = drifted_fields(&cache, config);
    if drift.is_empty() {
        println!("fresh: {} entries", cache.len());
        Ok(false)
    } else {
        println!("stale: {} changed", drift.join(", "));
        Ok(true)
    }
}

/// Names the fingerprint components that differ from the current run.
fn drifted_fields(cache: &FileCache, config: &RunConfig) -> Vec<&'static str> {
    let mut drift = Vec::new();
    if cache.runtime_version() != RUNTIME_VERSION {
        drift.push("runtime version");
    }
    if cache.linting() != config.linting {
        drift.push("linting");
    }
    if cache.rules() != &config.rules {
        drift.push("rules");
    }
    debug_assert_eq!(
        drift.is_empty(),
        !cache.is_stale(RUNTIME_VERSION, config.linting, &config.rules)
    );
    drift
}
