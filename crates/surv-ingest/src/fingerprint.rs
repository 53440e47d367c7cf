//! Dataset identity for memoization keys.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content fingerprint of an ingested dataset.
///
/// Derived from the raw file bytes, so any change to the input produces a
/// different id and invalidates every cache entry keyed on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fingerprint raw input bytes: hex-encoded sha256.
pub fn fingerprint_bytes(bytes: &[u8]) -> DatasetId {
    let digest = Sha256::digest(bytes);
    DatasetId(hex::encode(digest))
}
