//! In-process cache store using Moka.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tokio::time::Instant;
use tracing::debug;

use super::CacheStore;
use crate::error::CacheError;

/// Default maximum number of entries.
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug)]
struct StoredEntry {
    bytes: Vec<u8>,
    ttl: Duration,
    /// Deadline on the tokio clock, checked on every read.
    expires_at: Instant,
}

/// Per-entry TTL: each entry lives for the TTL it was written with.
struct EntryTtl;

impl Expiry<String, Arc<StoredEntry>> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Arc<StoredEntry>,
        _created_at: std::time::Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Arc<StoredEntry>,
        _updated_at: std::time::Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Cache en memoria usando Moka.
/// Thread-safe y async-friendly.
///
/// Moka evicts expired entries on its own schedule; reads additionally
/// compare against the tokio clock, so an entry is absent as soon as its
/// TTL has elapsed (and tests can drive expiry with a paused clock).
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use menuscan_backends::cache::{CacheStore, MemoryStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// store.set_ex("dish:42", b"{}".to_vec(), Duration::from_secs(60)).await.unwrap();
/// assert!(store.get("dish:42").await.unwrap().is_some());
/// # }
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    inner: Cache<String, Arc<StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Crea un store con el maximo numero de entries dado.
    pub fn with_capacity(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryTtl)
            .eviction_listener(|key, _value, cause| {
                debug!(key = %key, cause = ?cause, "Memory cache entry evicted");
            })
            .build();

        Self { inner }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(entry) = self.inner.get(key).await else {
            return Ok(None);
        };

        if Instant::now() >= entry.expires_at {
            self.inner.invalidate(key).await;
            return Ok(None);
        }

        Ok(Some(entry.bytes.clone()))
    }

    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let entry = StoredEntry {
            bytes: value,
            ttl,
            expires_at: Instant::now() + ttl,
        };
        self.inner.insert(key.to_string(), Arc::new(entry)).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
