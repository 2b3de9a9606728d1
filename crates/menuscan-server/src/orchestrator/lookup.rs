//! Cache-aside lookup by id.

use std::time::Instant;

use menuscan_backends::BackendErrorKind;
use menuscan_core::{CacheKey, LookupOptions, ResourceKind};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{Orchestrator, resource_label};
use crate::error::ApiError;
use crate::metrics::record_backend_call;

impl Orchestrator {
    /// Fetches a resource, serving from cache when possible.
    ///
    /// On a miss the menu service is called. For kinds whose policy
    /// populates the cache, a successful result is written before this
    /// returns and every backend failure is reported as `NOT_FOUND`. For
    /// read-only kinds the backend failure is mapped precisely.
    #[instrument(skip(self, kind, options), fields(kind = kind.namespace()))]
    pub async fn get_by_id(
        &self,
        kind: ResourceKind,
        id: &str,
        options: &LookupOptions,
    ) -> Result<Value, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::not_found(resource_label(kind)));
        }

        let key = CacheKey::new(kind, id);
        if let Some(cached) = self.cache.get::<Value>(&key).await {
            info!(key = %key, "Serving from cache");
            return Ok(cached);
        }

        let policy = self.config.policy_for(kind);
        let start = Instant::now();
        let result = self.backend.fetch(kind, id, options).await;

        match result {
            Ok(value) => {
                record_backend_call("get_by_id", "ok", start.elapsed());
                if let Some(ttl) = policy.cache_ttl {
                    self.cache.set(&key, &value, ttl).await;
                }
                Ok(value)
            },
            Err(err) => {
                record_backend_call("get_by_id", err.kind.as_str(), start.elapsed());
                warn!(key = %key, backend = self.backend.name(), error = %err, "Lookup failed");

                if policy.populates_cache() {
                    return Err(ApiError::not_found(resource_label(kind)));
                }

                Err(match err.kind {
                    BackendErrorKind::NotFound => ApiError::not_found(resource_label(kind)),
                    BackendErrorKind::Unavailable => ApiError::Unavailable,
                    BackendErrorKind::ProcessingError => ApiError::Processing {
                        details: err.message,
                    },
                })
            },
        }
    }
}
