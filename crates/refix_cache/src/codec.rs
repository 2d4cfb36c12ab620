//! Persistence codec for [`FileCache`].
//!
//! Blob layout:
//!
//! | Bytes | Content |
//! |-------|---------|
//! | 0..4  | Magic `RFXC` |
//! | 4..8  | Format version (`u32`, little-endian) |
//! | 8..   | `rkyv` archive of the cache payload |
//!
//! The rule signature is stored as canonical JSON text so the archived
//! layout does not depend on the shape of rule configuration values.

use std::collections::HashMap;

use rkyv::rancor;
use rkyv::util::AlignedVec;
use tracing::debug;

use crate::{CacheError, ConfigFingerprint, ContentFingerprint, FileCache, RuleSignature};

/// Leading bytes of every cache blob.
pub const MAGIC: &[u8; 4] = b"RFXC";

/// Current blob format version.
///
/// Blobs written with any other version decode as unusable.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = MAGIC.len() + size_of::<u32>();

#[derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
struct CachePayload {
    runtime_version: String,
    linting: bool,
    rules: String,
    entries: HashMap<String, ContentFingerprint>,
}

/// Encodes the full cache into a blob.
pub fn encode(cache: &FileCache) -> Result<Vec<u8>, CacheError> {
    let fingerprint = cache.fingerprint();
    let payload = CachePayload {
        runtime_version: fingerprint.runtime_version.clone(),
        linting: fingerprint.linting,
        rules: fingerprint.rules.to_canonical_json(),
        entries: cache
            .entries()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    };

    let body = rkyv::to_bytes::<rancor::Error>(&payload)
        .map_err(|e| CacheError::Serialization(e.to_string()))?;

    let mut blob = Vec::with_capacity(HEADER_LEN + body.len());
    blob.extend_from_slice(MAGIC);
    blob.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    blob.extend_from_slice(&body);
    Ok(blob)
}

/// Decodes a blob produced by [`encode`].
///
/// Every failure is reported as [`CacheError::Corrupted`]; callers treat it
/// as "no usable cache".
pub fn decode(bytes: &[u8]) -> Result<FileCache, CacheError> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::corrupted(format!(
            "blob is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let (header, body) = bytes.split_at(HEADER_LEN);
    if &header[..MAGIC.len()] != MAGIC {
        return Err(CacheError::corrupted("unrecognized magic bytes"));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&header[MAGIC.len()..]);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(CacheError::corrupted(format!(
            "format version {} is not supported (expected {})",
            version, FORMAT_VERSION
        )));
    }

    // Archived data must be aligned; a buffer read from disk may not be.
    let mut aligned = AlignedVec::<16>::with_capacity(body.len());
    aligned.extend_from_slice(body);

    let payload = rkyv::from_bytes::<CachePayload, rancor::Error>(&aligned)
        .map_err(|e| CacheError::corrupted(e.to_string()))?;

    let rules = RuleSignature::from_json(&payload.rules)
        .map_err(|e| CacheError::corrupted(format!("stored rules: {}", e)))?;

    debug!(
        "Decoded cache blob with {} entries (runtime {})",
        payload.entries.len(),
        payload.runtime_version
    );

    Ok(FileCache::from_parts(
        ConfigFingerprint::new(payload.runtime_version, payload.linting, rules),
        payload.entries,
    ))
}
