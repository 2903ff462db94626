//! Size-bounded key/value byte cache with per-entry TTL.
//!
//! Backed by `moka::sync::Cache`, which is internally sharded and safe to
//! share across tasks without external locking. Capacity is measured in
//! bytes (key length plus value length) and eviction is delegated to moka's
//! size-aware TinyLFU/LRU policy.

use moka::{sync::Cache, Expiry};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// TTL applied by [`ByteCache::set`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Smallest capacity a cache is built with; smaller requests are raised to it.
pub const MIN_CAPACITY_BYTES: u64 = 512 * 1024;

/// A single entry may take at most `capacity / ENTRY_LIMIT_DIVISOR` bytes.
const ENTRY_LIMIT_DIVISOR: u64 = 1024;

/// Cache errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache entry of {size} bytes exceeds the per-entry limit of {limit} bytes")]
    EntryTooLarge { size: u64, limit: u64 },
}

#[derive(Clone)]
struct CacheEntry {
    value: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
/// A zero TTL means the entry never expires.
struct PerEntryTtl;

impl PerEntryTtl {
    fn ttl_of(entry: &CacheEntry) -> Option<Duration> {
        if entry.ttl.is_zero() {
            None
        } else {
            Some(entry.ttl)
        }
    }
}

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Self::ttl_of(value)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Self::ttl_of(value)
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries={}, hits={}, misses={}",
            self.entries, self.hits, self.misses
        )
    }
}

/// Concurrent byte cache with a byte-size bound and per-entry TTL.
pub struct ByteCache {
    inner: Cache<String, CacheEntry>,
    capacity_bytes: u64,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ByteCache {
    /// Creates a cache bounded to `capacity_bytes` (at least [`MIN_CAPACITY_BYTES`]).
    pub fn new(capacity_bytes: u64, default_ttl: Duration) -> Self {
        let capacity_bytes = capacity_bytes.max(MIN_CAPACITY_BYTES);
        let inner = Cache::builder()
            .max_capacity(capacity_bytes)
            .weigher(|key: &String, entry: &CacheEntry| -> u32 {
                u32::try_from(key.len() + entry.value.len()).unwrap_or(u32::MAX)
            })
            .expire_after(PerEntryTtl)
            .build();

        Self {
            inner,
            capacity_bytes,
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache using [`DEFAULT_TTL`].
    pub fn with_capacity(capacity_bytes: u64) -> Self {
        Self::new(capacity_bytes, DEFAULT_TTL)
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Largest key + value size accepted by a single write.
    pub fn max_entry_bytes(&self) -> u64 {
        self.capacity_bytes / ENTRY_LIMIT_DIVISOR
    }

    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.set_with_ttl(key, value, self.default_ttl)
    }

    /// Stores `value` under `key`, expiring after `ttl` (zero = never).
    /// Overwriting a key resets its TTL.
    pub fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let size = (key.len() + value.len()) as u64;
        let limit = self.max_entry_bytes();
        if size > limit {
            return Err(CacheError::EntryTooLarge { size, limit });
        }

        self.inner.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::from(value),
                ttl,
            },
        );
        Ok(())
    }

    /// Returns the stored bytes, or `None` if the key is absent or expired.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.inner.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.to_vec())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        self.inner.invalidate(key);
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entries: self.inner.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for ByteCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteCache")
            .field("capacity_bytes", &self.capacity_bytes)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
