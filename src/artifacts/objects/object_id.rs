//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings representing SHA-1
//! hashes. They uniquely identify every stored object (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects are stored in `objects/<first-2-chars>/<remaining-38-chars>`.
//! Inside tree payloads the id is written as 20 raw bytes.

use crate::artifacts::core::{StoreError, StoreResult};
use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case hex digits are accepted and normalized to lower case.
    pub fn try_parse(id: impl Into<String>) -> StoreResult<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH || !is_hex(&id) {
            return Err(StoreError::InvalidObjectId { value: id });
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a raw 20-byte digest
    pub fn from_raw(raw: &[u8; OBJECT_ID_BYTES]) -> Self {
        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Self(hex40)
    }

    /// Convert to the raw 20-byte form used inside tree entries
    pub fn to_raw(&self) -> [u8; OBJECT_ID_BYTES] {
        let mut raw = [0u8; OBJECT_ID_BYTES];
        // the string was validated as 40 hex digits on construction
        for (i, byte) in raw.iter_mut().enumerate() {
            let pair = &self.0[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).unwrap_or_default();
        }
        raw
    }

    /// Split into the fan-out directory name and the file name
    pub fn split(&self) -> (&str, &str) {
        self.0.split_at(2)
    }

    /// Convert to file system path for object storage
    ///
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.split();
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

/// Whether every character of `value` is an ASCII hex digit.
pub fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
