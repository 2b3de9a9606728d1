//! Dependency health aggregation.
//!
//! Each dependency is checked by a [`HealthProbe`]. The aggregator runs all
//! probes concurrently, each on its own task and under its own timeout, so
//! a hung or panicking probe only affects its own entry in the report.

mod probes;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use menuscan_core::{Dependency, DependencyStatus, HealthReport};
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub use probes::{CacheStoreProbe, MemcachedHealthProbe, RpcChannelProbe, SearchClusterProbe};

/// Checks one dependency.
///
/// # Implementors
///
/// - `CacheStoreProbe` - primary cache `PING`
/// - `MemcachedHealthProbe` - secondary cache `version` round trip
/// - `SearchClusterProbe` - search cluster health color
/// - `RpcChannelProbe` - connectivity of the gRPC endpoints
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// The dependency this probe reports for.
    fn dependency(&self) -> Dependency;

    /// Runs the check. Failures are reported as a status, never returned.
    async fn check(&self) -> DependencyStatus;
}

/// Runs every registered probe and reduces the results.
///
/// Dependencies without a probe are reported as `disconnected`.
#[derive(Clone)]
pub struct HealthAggregator {
    probes: Vec<Arc<dyn HealthProbe>>,
    timeout: Duration,
}

impl HealthAggregator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            probes: Vec::new(),
            timeout,
        }
    }

    /// Registers a probe. A later probe for the same dependency wins.
    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.retain(|p| p.dependency() != probe.dependency());
        self.probes.push(probe);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probes every dependency concurrently and builds the report.
    pub async fn check(&self) -> HealthReport {
        let mut services: BTreeMap<Dependency, DependencyStatus> = Dependency::ALL
            .iter()
            .map(|d| (*d, DependencyStatus::Disconnected))
            .collect();

        let mut tasks = JoinSet::new();
        let mut pending = HashMap::new();
        for probe in &self.probes {
            let probe = Arc::clone(probe);
            let dependency = probe.dependency();
            let timeout = self.timeout;
            let handle = tasks.spawn(async move {
                match tokio::time::timeout(timeout, probe.check()).await {
                    Ok(status) => status,
                    Err(_) => {
                        warn!(dependency = %dependency, timeout_ms = timeout.as_millis() as u64, "Health probe timed out");
                        DependencyStatus::Error
                    },
                }
            });
            pending.insert(handle.id(), dependency);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, status)) => {
                    if let Some(dependency) = pending.remove(&id) {
                        debug!(dependency = %dependency, status = %status, "Health probe finished");
                        services.insert(dependency, status);
                    }
                },
                Err(err) => {
                    if let Some(dependency) = pending.remove(&err.id()) {
                        warn!(dependency = %dependency, error = %err, "Health probe aborted");
                        services.insert(dependency, DependencyStatus::Error);
                    }
                },
            }
        }

        HealthReport::new(services)
    }
}
