//! Deterministic cache keys derived from request descriptors.
//!
//! A descriptor is any JSON value. It is rendered in canonical form (object
//! keys sorted at every nesting level, no insignificant whitespace) and the
//! SHA-256 digest of that string becomes the record id and file stem.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{FissionError, Result};

/// File extension of persisted cache records.
pub const RECORD_EXTENSION: &str = "json";

/// Hex SHA-256 digest identifying one cache record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    digest: String,
}

impl CacheKey {
    /// Derive the key for a descriptor.
    pub fn from_descriptor(descriptor: &Value) -> Self {
        let canonical = canonical_json(descriptor);
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Self {
            digest: hex::encode(hasher.finalize()),
        }
    }

    /// Full 64-character hex digest.
    pub fn as_str(&self) -> &str {
        &self.digest
    }

    /// First 8 characters, for log lines.
    pub fn short(&self) -> &str {
        &self.digest[..8.min(self.digest.len())]
    }

    /// Record file name: `<digest>.json`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.digest, RECORD_EXTENSION)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digest)
    }
}

/// Convert a typed key shape into a descriptor value.
///
/// Fails with [`FissionError::InvalidDescriptor`] when the value cannot be
/// represented as JSON (for example a map with non-string keys).
pub fn descriptor_of<T: Serialize>(shape: &T) -> Result<Value> {
    serde_json::to_value(shape).map_err(|e| FissionError::InvalidDescriptor(e.to_string()))
}

/// Render a JSON value with object keys sorted at every level.
///
/// Sorting is done here rather than relying on `serde_json::Map` ordering,
/// which changes when any crate in the graph enables `preserve_order`.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
