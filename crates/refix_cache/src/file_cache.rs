//! The persisted cache implementation.

use std::collections::HashMap;

use crate::{Cache, ConfigFingerprint, ContentFingerprint, RuleSignature};

/// Cache of content fingerprints bound to one configuration.
///
/// The runtime version is captured once, when the cache is created, so a
/// cache restored under a different runtime reports itself as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCache {
    /// Configuration this cache was built under.
    fingerprint: ConfigFingerprint,
    /// File key to content fingerprint.
    entries: HashMap<String, ContentFingerprint>,
}

impl FileCache {
    /// Creates an empty cache for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `runtime_version` - Version of the running engine
    /// * `linting` - Whether linting is enabled for this run
    /// * `rules` - Active rule configuration
    pub fn new(runtime_version: impl Into<String>, linting: bool, rules: RuleSignature) -> Self {
        Self::from_fingerprint(ConfigFingerprint::new(runtime_version, linting, rules))
    }

    /// Creates an empty cache from an existing fingerprint.
    pub fn from_fingerprint(fingerprint: ConfigFingerprint) -> Self {
        Self {
            fingerprint,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn from_parts(
        fingerprint: ConfigFingerprint,
        entries: HashMap<String, ContentFingerprint>,
    ) -> Self {
        Self {
            fingerprint,
            entries,
        }
    }

    /// Returns the configuration fingerprint.
    pub fn fingerprint(&self) -> &ConfigFingerprint {
        &self.fingerprint
    }

    /// Iterates over all entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, ContentFingerprint)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Keeps only entries whose key satisfies `keep`.
    ///
    /// Returns the number of removed entries.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| keep(key));
        before - self.entries.len()
    }
}

impl Cache for FileCache {
    fn runtime_version(&self) -> &str {
        &self.fingerprint.runtime_version
    }

    fn linting(&self) -> bool {
        self.fingerprint.linting
    }

    fn rules(&self) -> &RuleSignature {
        &self.fingerprint.rules
    }

    fn is_stale(&self, runtime_version: &str, linting: bool, rules: &RuleSignature) -> bool {
        !self.fingerprint.matches(runtime_version, linting, rules)
    }

    fn get(&self, key: &str) -> Option<ContentFingerprint> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, fingerprint: ContentFingerprint) {
        self.entries.insert(key.to_string(), fingerprint);
    }

    fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
