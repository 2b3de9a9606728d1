//! Fail-soft cache-aside accessor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use menuscan_backends::{CacheError, CacheStore};
use menuscan_core::CacheKey;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::metrics::CacheMetrics;

/// Reads and writes typed values through a [`CacheStore`].
///
/// Values are stored as JSON. Cloning shares the store and the metrics.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use menuscan_backends::MemoryStore;
/// use menuscan_core::{CacheKey, ResourceKind};
/// use menuscan_server::cache::CacheAside;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = CacheAside::new(Arc::new(MemoryStore::new()));
/// let key = CacheKey::new(ResourceKind::Dish, "42");
///
/// if let Some(dish) = cache.get::<serde_json::Value>(&key).await {
///     println!("Cache hit: {}", dish);
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    metrics: CacheMetrics,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            metrics: CacheMetrics::new(),
        }
    }

    /// Returns the cached value, or `None` on a miss.
    ///
    /// Store failures and undecodable payloads are logged and reported as
    /// a miss; see [`CacheAside::lookup`].
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let start = Instant::now();
        let raw = self.store.get(&key.to_string()).await;
        self.metrics.record_operation_duration("get", start.elapsed());

        let value = self.lookup(key, raw);
        if value.is_some() {
            self.metrics.record_hit(key.kind().namespace());
        } else {
            self.metrics.record_miss(key.kind().namespace());
        }
        value
    }

    /// Miss-on-failure policy. Turns the raw store result into a value:
    /// absent entries, store errors and payloads that do not decode as `T`
    /// all yield `None`.
    pub fn lookup<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
        raw: Result<Option<Vec<u8>>, CacheError>,
    ) -> Option<T> {
        match raw {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    Some(value)
                },
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    self.metrics.record_error("get");
                    None
                },
            },
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                None
            },
            Err(e) => {
                warn!(key = %key, store = self.store.name(), error = %e, "Cache read failed, treating as miss");
                self.metrics.record_error("get");
                None
            },
        }
    }

    /// Writes `value` with the given TTL. Best effort: failures are logged
    /// and never returned. Completes before returning so a following read
    /// observes the entry.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode cache entry");
                self.metrics.record_error("set");
                return;
            },
        };

        let start = Instant::now();
        let result = self.store.set_ex(&key.to_string(), bytes, ttl).await;
        self.metrics.record_operation_duration("set", start.elapsed());

        match result {
            Ok(()) => debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache populated"),
            Err(e) => {
                warn!(key = %key, store = self.store.name(), error = %e, "Cache write failed");
                self.metrics.record_error("set");
            },
        }
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }
}
