//! The cache capability contract.

use crate::{ContentFingerprint, RuleSignature};

/// Capabilities a processing engine depends on.
///
/// [`Cache::is_stale`] must be checked before any [`Cache::get`] result is
/// trusted: a content fingerprint recorded under a different configuration
/// says nothing about whether the file needs processing now.
pub trait Cache {
    /// Runtime version the cache was built under.
    fn runtime_version(&self) -> &str;

    /// Linting flag the cache was built under.
    fn linting(&self) -> bool;

    /// Rule configuration the cache was built under.
    fn rules(&self) -> &RuleSignature;

    /// Returns true if any supplied value differs from the stored ones.
    fn is_stale(&self, runtime_version: &str, linting: bool, rules: &RuleSignature) -> bool;

    /// Returns the stored fingerprint for `key`, or `None` if absent.
    fn get(&self, key: &str) -> Option<ContentFingerprint>;

    /// Stores `fingerprint` for `key`, replacing any previous value.
    fn set(&mut self, key: &str, fingerprint: ContentFingerprint);

    /// Removes the entry for `key`. Does nothing if absent.
    fn clear(&mut self, key: &str);

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` is recorded with exactly `fingerprint`.
    fn is_fresh(&self, key: &str, fingerprint: ContentFingerprint) -> bool {
        self.get(key) == Some(fingerprint)
    }
}
