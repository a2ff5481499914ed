//! File-backed response cache with TTL expiry.
//!
//! One JSON file per record under the cache directory, named
//! `<sha256-of-descriptor>.json` and holding `data`, `created_at`,
//! `expires_at` and `key_data`. Expiry is lazy: an expired record is removed
//! when a lookup touches it, or by an explicit [`ResponseCache::purge_expired`].
//!
//! Every I/O or decoding failure is contained inside the operation that hit
//! it. Callers see a miss, a smaller count, or a reduced stats contribution,
//! never an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::key::{CacheKey, RECORD_EXTENSION};
use crate::error::Result;

/// TTL applied when `store` is called without one (1 hour).
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Tooling sentinel written next to the records. Not a record.
const SENTINEL_FILE: &str = ".gitignore";
const SENTINEL_CONTENTS: &str = "*\n!.gitignore\n";

/// A persisted cache record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord<T> {
    /// Cached payload, opaque to the cache.
    pub data: T,
    /// Seconds since the Unix epoch.
    pub created_at: f64,
    /// `created_at + ttl`.
    pub expires_at: f64,
    /// Descriptor the key was derived from, kept for diagnostics.
    pub key_data: Value,
}

impl<T> CacheRecord<T> {
    /// Whether the record may still be served at `now`.
    pub fn is_valid_at(&self, now: f64) -> bool {
        now <= self.expires_at
    }
}

/// Only the fields a scan needs; the payload is never decoded.
#[derive(Deserialize)]
struct RecordHeader {
    expires_at: f64,
}

/// Aggregate view of the cache directory.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    /// Expired plus unparsable records.
    pub expired_entries: usize,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub cache_dir: PathBuf,
}

/// Durable TTL-bounded memoization keyed by a descriptor digest.
#[derive(Debug)]
pub struct ResponseCache {
    dir: PathBuf,
    default_ttl: i64,
}

impl ResponseCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    ///
    /// Failing to create the directory is an error since nothing could ever be
    /// cached; a missing sentinel file is only logged.
    pub fn open(dir: impl Into<PathBuf>, default_ttl: i64) -> Result<Self> {
        let cache = Self {
            dir: dir.into(),
            default_ttl,
        };
        cache.ensure_dir()?;
        let sentinel = cache.dir.join(SENTINEL_FILE);
        if !sentinel.exists() {
            if let Err(e) = std::fs::write(&sentinel, SENTINEL_CONTENTS) {
                warn!(path = %sentinel.display(), error = %e, "Failed to write cache sentinel");
            }
        }
        Ok(cache)
    }

    /// Directory holding the records.
    pub fn location(&self) -> &Path {
        &self.dir
    }

    /// TTL in seconds used when `store` gets `None`.
    pub fn default_ttl(&self) -> i64 {
        self.default_ttl
    }

    /// Look up the payload cached for `descriptor`.
    pub fn lookup<T: DeserializeOwned>(&self, descriptor: &Value) -> Option<T> {
        self.lookup_at(descriptor, now_secs())
    }

    /// [`lookup`](Self::lookup) against an explicit clock reading.
    pub fn lookup_at<T: DeserializeOwned>(&self, descriptor: &Value, now: f64) -> Option<T> {
        let key = CacheKey::from_descriptor(descriptor);
        let path = self.record_path(&key);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                error!(key = %key.short(), error = %e, "Cache read error, dropping record");
                remove_quietly(&path);
                return None;
            }
        };

        let record: CacheRecord<T> = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(e) => {
                error!(key = %key.short(), error = %e, "Cache record is corrupt, dropping it");
                remove_quietly(&path);
                return None;
            }
        };

        if !record.is_valid_at(now) {
            remove_quietly(&path);
            info!(key = %key.short(), "Cache expired");
            return None;
        }

        info!(key = %key.short(), "Cache hit");
        Some(record.data)
    }

    /// Persist `payload` for `descriptor`, replacing any previous record.
    ///
    /// `ttl` is in seconds; `None` applies the default. A zero or negative TTL
    /// writes a record that is already expired.
    pub fn store<T: Serialize>(&self, descriptor: &Value, payload: &T, ttl: Option<i64>) {
        self.store_at(descriptor, payload, ttl, now_secs());
    }

    /// [`store`](Self::store) against an explicit clock reading.
    pub fn store_at<T: Serialize>(
        &self,
        descriptor: &Value,
        payload: &T,
        ttl: Option<i64>,
        now: f64,
    ) {
        let key = CacheKey::from_descriptor(descriptor);
        let ttl = ttl.unwrap_or(self.default_ttl);
        let record = CacheRecord {
            data: payload,
            created_at: now,
            expires_at: now + ttl as f64,
            key_data: descriptor.clone(),
        };

        match self.write_record(&key, &record) {
            Ok(()) => info!(key = %key.short(), ttl_secs = ttl, "Cached response"),
            Err(e) => error!(key = %key.short(), error = %e, "Cache write error"),
        }
    }

    /// Delete the record for `descriptor`, or every record when `None`.
    ///
    /// Returns the number of records actually removed.
    pub fn invalidate(&self, descriptor: Option<&Value>) -> usize {
        let Some(descriptor) = descriptor else {
            let mut count = 0;
            for path in self.record_files() {
                match std::fs::remove_file(&path) {
                    Ok(()) => count += 1,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to delete cache record")
                    }
                }
            }
            info!("Cleared {} cache entries", count);
            return count;
        };

        let key = CacheKey::from_descriptor(descriptor);
        match std::fs::remove_file(self.record_path(&key)) {
            Ok(()) => {
                debug!(key = %key.short(), "Invalidated cache entry");
                1
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                warn!(key = %key.short(), error = %e, "Failed to delete cache record");
                0
            }
        }
    }

    /// Read-only audit of every record in the directory.
    pub fn stats(&self) -> CacheStats {
        self.stats_at(now_secs())
    }

    /// [`stats`](Self::stats) against an explicit clock reading.
    pub fn stats_at(&self, now: f64) -> CacheStats {
        let files = self.record_files();
        let mut valid_entries = 0;
        let mut total_size_bytes = 0u64;

        for path in &files {
            total_size_bytes += std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            if read_header(path).is_some_and(|h| now <= h.expires_at) {
                valid_entries += 1;
            }
        }

        CacheStats {
            total_entries: files.len(),
            valid_entries,
            expired_entries: files.len() - valid_entries,
            total_size_bytes,
            total_size_mb: (total_size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0,
            cache_dir: self.dir.clone(),
        }
    }

    /// Delete every expired or unreadable record. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(now_secs())
    }

    /// [`purge_expired`](Self::purge_expired) against an explicit clock reading.
    pub fn purge_expired_at(&self, now: f64) -> usize {
        let mut removed = 0;
        for path in self.record_files() {
            let servable = read_header(&path).is_some_and(|h| now <= h.expires_at);
            if !servable && std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("Purged {} expired cache entries", removed);
        }
        removed
    }

    // -- private helpers ---------------------------------------------------

    fn record_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Write to a temp file in the same directory, then rename over the
    /// record so readers never see a partial file under the record name.
    fn write_record<T: Serialize>(&self, key: &CacheKey, record: &CacheRecord<T>) -> Result<()> {
        self.ensure_dir()?;
        let bytes = serde_json::to_vec(record)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.persist(self.record_path(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn record_files(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Failed to scan cache directory");
                return Vec::new();
            }
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
            })
            .collect()
    }
}

fn read_header(path: &Path) -> Option<RecordHeader> {
    let bytes = std::fs::read(path).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to delete cache record");
        }
    }
}

/// Current wall-clock time in fractional seconds since the Unix epoch.
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
