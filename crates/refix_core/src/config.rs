//! Run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use refix_cache::{DEFAULT_CACHE_FILE, RuleSignature};

use crate::EngineError;

/// Configuration for one run of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Rule configuration, keyed by rule name.
    #[serde(default)]
    pub rules: RuleSignature,

    /// Whether linting is enabled.
    #[serde(default)]
    pub linting: bool,

    /// Whether to use the incremental cache.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Cache file location.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Report fixes without writing them.
    #[serde(default)]
    pub dry_run: bool,

    /// Base directory for file keys and the cache file.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_cache() -> bool {
    true
}

fn default_cache_file() -> String {
    DEFAULT_CACHE_FILE.to_string()
}

impl RunConfig {
    /// Creates a configuration with no rules and caching enabled.
    pub fn new() -> Self {
        Self {
            rules: RuleSignature::new(),
            linting: false,
            cache: true,
            cache_file: default_cache_file(),
            dry_run: false,
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Accepts JSON with comments and trailing commas.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON (or JSONC) text.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| EngineError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| EngineError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the cache file path, resolved against the base directory.
    pub fn cache_path(&self) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(&self.cache_file),
            None => PathBuf::from(&self.cache_file),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}
