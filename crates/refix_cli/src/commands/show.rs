//! Show command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use refix_cache::{Cache, FileCache};

use super::require_cache;

pub fn run_show(cache_path: &Path, json: bool) -> Result<bool> {
    let cache = require_cache(cache_path)?;

    if json {
        let output = serde_json::to_string_pretty(&to_json(&cache)).into_diagnostic()?;
        println!("{}", output);
        return Ok(false);
    }

    println!("Cache: {}", cache_path.display());
    println!("Runtime version: {}", cache.runtime_version());
    println!("Linting: {}", cache.linting());
    println!("Rules: {}", cache.rules().to_canonical_json());
    println!("Entries: {}", cache.len());
    for (key, fingerprint) in sorted_entries(&cache) {
        println!("  {:>20}  {}", fingerprint, key);
    }

    Ok(false)
}

fn sorted_entries(cache: &FileCache) -> Vec<(&str, i64)> {
    let mut entries: Vec<_> = cache.entries().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    entries
}

fn to_json(cache: &FileCache) -> serde_json::Value {
    let entries: serde_json::Map<String, serde_json::Value> = sorted_entries(cache)
        .into_iter()
        .map(|(key, fingerprint)| (key.to_string(), fingerprint.into()))
        .collect();

    serde_json::json!({
        "runtime_version": cache.runtime_version(),
        "linting": cache.linting(),
        "rules": cache.rules().to_value(),
        "entries": entries,
    })
}
