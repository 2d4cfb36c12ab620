//! Content fingerprints.

/// Checksum of a file's raw bytes.
pub type ContentFingerprint = i64;

/// Computes the content fingerprint of `bytes`.
///
/// Uses the leading 64 bits of the BLAKE3 digest, read little-endian.
pub fn checksum(bytes: &[u8]) -> ContentFingerprint {
    let hash = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    i64::from_le_bytes(head)
}
