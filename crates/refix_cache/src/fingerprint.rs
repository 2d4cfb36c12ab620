//! Configuration fingerprints.
//!
//! A [`ConfigFingerprint`] captures everything outside a file's own content
//! that influences how the file is processed. Cached content fingerprints are
//! only meaningful under the exact configuration that produced them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::CacheError;

/// Structural signature of the active rule configuration.
///
/// Maps a rule name to its configuration, which may be a scalar or an
/// arbitrarily nested JSON value. Equality is deep and does not depend on
/// the order in which rules or nested keys were inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSignature {
    rules: BTreeMap<String, Value>,
}

impl RuleSignature {
    /// Creates an empty signature (no rules configured).
    pub fn new() -> Self {
        Self::empty()
    }

    /// Const constructor for an empty signature.
    pub const fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Builds a signature from a JSON object.
    ///
    /// Fails if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, CacheError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(CacheError::invalid_rules(format!(
                "expected an object of rule names, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parses a signature from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| CacheError::invalid_rules(e.to_string()))?;
        Self::from_value(value)
    }

    /// Adds or replaces a rule's configuration.
    pub fn insert(&mut self, name: impl Into<String>, config: Value) {
        self.rules.insert(name.into(), config);
    }

    /// Returns the configuration of a rule.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.rules.get(name)
    }

    /// Returns the number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the signature as a JSON object with keys sorted at every depth.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.rules
                .iter()
                .map(|(name, config)| (name.clone(), canonicalize(config)))
                .collect(),
        )
    }

    /// Serializes to canonical JSON text.
    ///
    /// Two equal signatures always produce identical text.
    pub fn to_canonical_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RuleSignature {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Rebuilds objects with their keys in sorted order.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The configuration a cache was built under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFingerprint {
    /// Version of the runtime that built the cache.
    pub runtime_version: String,

    /// Whether linting was enabled.
    pub linting: bool,

    /// Active rule configuration.
    pub rules: RuleSignature,
}

impl ConfigFingerprint {
    /// Creates a new fingerprint.
    pub fn new(runtime_version: impl Into<String>, linting: bool, rules: RuleSignature) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            linting,
            rules,
        }
    }

    /// Returns true if every component equals the supplied one.
    pub fn matches(&self, runtime_version: &str, linting: bool, rules: &RuleSignature) -> bool {
        // Cheapest comparisons first; rule comparison walks the whole tree.
        self.linting == linting && self.runtime_version == runtime_version && self.rules == *rules
    }
}
