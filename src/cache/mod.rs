//! LLM response caching: descriptor digests and the file-backed TTL store.

pub mod key;
pub mod response_cache;

pub use key::{canonical_json, descriptor_of, CacheKey};
pub use response_cache::{now_secs, CacheRecord, CacheStats, ResponseCache, DEFAULT_TTL_SECS};
