//! Concrete health probes.

use std::sync::Arc;

use async_trait::async_trait;
use menuscan_backends::{CacheStore, MemcachedProbe, RpcEndpoint, SearchIndex};
use menuscan_core::{Dependency, DependencyStatus};
use tokio::task::JoinSet;
use tracing::warn;

use super::HealthProbe;

/// Primary cache: `PING`.
pub struct CacheStoreProbe {
    store: Arc<dyn CacheStore>,
}

impl CacheStoreProbe {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HealthProbe for CacheStoreProbe {
    fn dependency(&self) -> Dependency {
        Dependency::Redis
    }

    async fn check(&self) -> DependencyStatus {
        match self.store.ping().await {
            Ok(()) => DependencyStatus::Connected,
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "Cache health check failed");
                DependencyStatus::Error
            },
        }
    }
}

/// Secondary cache: `version` round trip.
pub struct MemcachedHealthProbe {
    probe: MemcachedProbe,
}

impl MemcachedHealthProbe {
    pub fn new(probe: MemcachedProbe) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl HealthProbe for MemcachedHealthProbe {
    fn dependency(&self) -> Dependency {
        Dependency::Memcached
    }

    async fn check(&self) -> DependencyStatus {
        match self.probe.ping().await {
            Ok(_version) => DependencyStatus::Connected,
            Err(e) => {
                warn!(addr = self.probe.addr(), error = %e, "Memcached health check failed");
                DependencyStatus::Error
            },
        }
    }
}

/// Search cluster: reports the cluster color as-is.
pub struct SearchClusterProbe {
    index: Arc<dyn SearchIndex>,
}

impl SearchClusterProbe {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl HealthProbe for SearchClusterProbe {
    fn dependency(&self) -> Dependency {
        Dependency::Elasticsearch
    }

    async fn check(&self) -> DependencyStatus {
        match self.index.cluster_health().await {
            Ok(color) => DependencyStatus::Cluster(color),
            Err(e) => {
                warn!(index = self.index.name(), error = %e, "Search health check failed");
                DependencyStatus::Error
            },
        }
    }
}

/// gRPC channels: connected when every endpoint accepts a connection,
/// degraded when only some do, error when none do.
pub struct RpcChannelProbe {
    endpoints: Vec<RpcEndpoint>,
}

impl RpcChannelProbe {
    pub fn new(endpoints: Vec<RpcEndpoint>) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl HealthProbe for RpcChannelProbe {
    fn dependency(&self) -> Dependency {
        Dependency::Grpc
    }

    async fn check(&self) -> DependencyStatus {
        if self.endpoints.is_empty() {
            return DependencyStatus::Disconnected;
        }

        let mut tasks = JoinSet::new();
        for endpoint in self.endpoints.iter().cloned() {
            tasks.spawn(async move {
                let result = endpoint.probe().await;
                if let Err(e) = &result {
                    warn!(endpoint = endpoint.name(), error = %e, "gRPC health check failed");
                }
                result.is_ok()
            });
        }

        let mut up = 0;
        while let Some(joined) = tasks.join_next().await {
            if matches!(joined, Ok(true)) {
                up += 1;
            }
        }

        channel_status(up, self.endpoints.len())
    }
}

fn channel_status(up: usize, total: usize) -> DependencyStatus {
    match up {
        0 => DependencyStatus::Error,
        n if n >= total => DependencyStatus::Connected,
        _ => DependencyStatus::Degraded,
    }
}
