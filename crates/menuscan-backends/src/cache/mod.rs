//! Key-value cache stores with per-entry TTL.
//!
//! The gateway only needs `GET` and `SETEX` semantics on opaque bytes, plus
//! a liveness probe for the health check.

mod memcached;
mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

pub use self::memcached::MemcachedProbe;
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// A key-value cache with TTL.
///
/// Implementations delegate concurrency control to the underlying store;
/// every operation is a single-key command.
///
/// # Implementors
///
/// - `RedisStore` - primary cache over a Redis connection manager
/// - `MemoryStore` - in-process Moka cache (development and tests)
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads the value stored at `key`. `Ok(None)` means absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` at `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), CacheError>;

    /// Returns the name of this store, for logs.
    fn name(&self) -> &str;
}

/// Converts a TTL to whole seconds as `SETEX` expects. Sub-second TTLs
/// round up to one second so an entry is never written already expired.
pub fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}
