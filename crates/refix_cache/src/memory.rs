//! In-memory cache for tests and cache-less runs.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::{Cache, ConfigFingerprint, ContentFingerprint, RuleSignature};

/// A [`Cache`] that is never persisted.
///
/// Besides storing entries it counts lookups and writes, so engines can be
/// checked for honoring the staleness gate.
#[derive(Debug, Default)]
pub struct MemoryCache {
    fingerprint: Option<ConfigFingerprint>,
    entries: BTreeMap<String, ContentFingerprint>,
    lookups: Cell<usize>,
    writes: usize,
}

impl MemoryCache {
    /// Creates an empty cache for the given configuration.
    pub fn new(runtime_version: impl Into<String>, linting: bool, rules: RuleSignature) -> Self {
        Self {
            fingerprint: Some(ConfigFingerprint::new(runtime_version, linting, rules)),
            ..Self::default()
        }
    }

    /// Number of `get` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Cache for MemoryCache {
    fn runtime_version(&self) -> &str {
        self.fingerprint
            .as_ref()
            .map(|f| f.runtime_version.as_str())
            .unwrap_or_default()
    }

    fn linting(&self) -> bool {
        self.fingerprint.as_ref().is_some_and(|f| f.linting)
    }

    fn rules(&self) -> &RuleSignature {
        static EMPTY: RuleSignature = RuleSignature::empty();
        self.fingerprint.as_ref().map(|f| &f.rules).unwrap_or(&EMPTY)
    }

    fn is_stale(&self, runtime_version: &str, linting: bool, rules: &RuleSignature) -> bool {
        // A default-constructed cache has no configuration and is always stale.
        match &self.fingerprint {
            Some(fingerprint) => !fingerprint.matches(runtime_version, linting, rules),
            None => true,
        }
    }

    fn get(&self, key: &str) -> Option<ContentFingerprint> {
        self.lookups.set(self.lookups.get() + 1);
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, fingerprint: ContentFingerprint) {
        self.writes += 1;
        self.entries.insert(key.to_string(), fingerprint);
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_cache_contract() {
        let rules = RuleSignature::from_value(json!({"A": true})).unwrap();
        let mut cache = MemoryCache::new("7.2.0", false, rules.clone());

        assert!(!cache.is_stale("7.2.0", false, &rules));
        assert!(cache.is_stale("7.2.0", true, &rules));

        assert_eq!(cache.get("f.txt"), None);
        cache.set("f.txt", 0);
        assert_eq!(cache.get("f.txt"), Some(0));
        cache.clear("f.txt");
        cache.clear("f.txt");
        assert_eq!(cache.get("f.txt"), None);

        assert_eq!(cache.lookups(), 3);
        assert_eq!(cache.writes(), 1);
    }

    #[test]
    fn test_default_memory_cache_is_stale() {
        let cache = MemoryCache::default();

        assert!(cache.is_stale("", false, &RuleSignature::new()));
        assert_eq!(cache.runtime_version(), "");
        assert!(cache.rules().is_empty());
    }
}
