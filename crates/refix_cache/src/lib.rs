//! # refix_cache
//!
//! Incremental cache for Refix.
//!
//! This crate lets a fixing engine skip files whose content and whose
//! processing configuration have not changed since the previous run.
//!
//! ## Cache Strategy
//!
//! 1. **Config fingerprint**: The cache records the runtime version, the
//!    linting flag and the rule configuration it was built under. Any drift
//!    invalidates the whole cache.
//! 2. **Content fingerprint**: Each file key maps to a checksum of the file's
//!    bytes at the time it was last processed successfully.
//!
//! ## Storage
//!
//! Cache is stored using `rkyv` behind a small versioned header. A blob
//! that fails validation is treated as a cold start, never as a hard error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use refix_cache::{Cache, CacheStore, FileCache, Loaded, checksum};
//!
//! let store = CacheStore::new(".refix.cache");
//! let mut cache = match store.load() {
//!     Loaded::Restored(cache) if !cache.is_stale(version, linting, &rules) => cache,
//!     _ => FileCache::new(version, linting, rules),
//! };
//!
//! let fingerprint = checksum(&bytes);
//! if cache.get("src/lib.php") != Some(fingerprint) {
//!     // reprocess, then:
//!     cache.set("src/lib.php", fingerprint);
//! }
//! store.save(&cache)?;
//! ```

mod cache;
mod checksum;
pub mod codec;
mod error;
mod file_cache;
mod fingerprint;
mod memory;
mod store;

pub use cache::Cache;
pub use checksum::{ContentFingerprint, checksum};
pub use error::CacheError;
pub use file_cache::FileCache;
pub use fingerprint::{ConfigFingerprint, RuleSignature};
pub use memory::MemoryCache;
pub use store::{CacheStore, ColdStart, DEFAULT_CACHE_FILE, Loaded};
