//! Health model: per-dependency status and the reduced system status.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Dependencies probed by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    /// Primary cache.
    Redis,
    /// Secondary cache.
    Memcached,
    /// Search index cluster.
    Elasticsearch,
    /// RPC channels to the menu and image services.
    Grpc,
}

impl Dependency {
    pub const ALL: [Dependency; 4] = [
        Dependency::Redis,
        Dependency::Memcached,
        Dependency::Elasticsearch,
        Dependency::Grpc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Memcached => "memcached",
            Self::Elasticsearch => "elasticsearch",
            Self::Grpc => "grpc",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reported by a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    Connected,
    /// Not configured or no handle available.
    Disconnected,
    /// The probe failed, timed out or panicked.
    Error,
    /// Reachable but only partially working.
    Degraded,
    /// Cluster status string reported by the search backend
    /// (`green`, `yellow`, `red`).
    Cluster(String),
}

impl DependencyStatus {
    /// Whether this status counts as fully healthy.
    ///
    /// `yellow` only means replicas are unassigned; every primary shard
    /// is allocated, so reads and writes work.
    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Connected => true,
            Self::Cluster(s) => matches!(s.as_str(), "green" | "yellow"),
            Self::Disconnected | Self::Error | Self::Degraded => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
            Self::Degraded => "degraded",
            Self::Cluster(s) => s,
        }
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DependencyStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reduced system status. There is no fatal state: anything short of
/// fully connected is `degraded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

impl OverallStatus {
    /// Reduces per-dependency statuses: healthy only if every one is.
    pub fn reduce<'a>(statuses: impl IntoIterator<Item = &'a DependencyStatus>) -> Self {
        if statuses.into_iter().all(DependencyStatus::is_healthy) {
            Self::Healthy
        } else {
            Self::Degraded
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::Healthy => 200,
            Self::Degraded => 503,
        }
    }
}

/// Health snapshot, rebuilt on every check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    pub services: BTreeMap<Dependency, DependencyStatus>,
}

impl HealthReport {
    /// Builds a report stamped with the current time.
    pub fn new(services: BTreeMap<Dependency, DependencyStatus>) -> Self {
        Self {
            status: OverallStatus::reduce(services.values()),
            timestamp: Utc::now(),
            services,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == OverallStatus::Healthy
    }
}

impl FromIterator<(Dependency, DependencyStatus)> for HealthReport {
    fn from_iter<T: IntoIterator<Item = (Dependency, DependencyStatus)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_connected() -> Vec<(Dependency, DependencyStatus)> {
        Dependency::ALL
            .iter()
            .map(|d| (*d, DependencyStatus::Connected))
            .collect()
    }

    #[test]
    fn test_all_connected_is_healthy() {
        let report: HealthReport = all_connected().into_iter().collect();
        assert_eq!(report.status, OverallStatus::Healthy);
        assert_eq!(report.status.http_status(), 200);
    }

    #[test]
    fn test_single_error_degrades() {
        let mut statuses = all_connected();
        statuses[2].1 = DependencyStatus::Error;

        let report: HealthReport = statuses.into_iter().collect();
        assert_eq!(report.status, OverallStatus::Degraded);
        assert_eq!(report.status.http_status(), 503);
        assert_eq!(report.services.len(), 4);
    }

    #[test]
    fn test_cluster_statuses() {
        assert!(DependencyStatus::Cluster("green".into()).is_healthy());
        assert!(DependencyStatus::Cluster("yellow".into()).is_healthy());
        assert!(!DependencyStatus::Cluster("red".into()).is_healthy());
        assert!(!DependencyStatus::Degraded.is_healthy());
        assert!(!DependencyStatus::Disconnected.is_healthy());
    }

    #[test]
    fn test_serialized_shape() {
        let mut statuses = all_connected();
        statuses[2].1 = DependencyStatus::Cluster("green".into());
        statuses[1].1 = DependencyStatus::Disconnected;

        let report: HealthReport = statuses.into_iter().collect();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "degraded");
        assert_eq!(json["services"]["redis"], "connected");
        assert_eq!(json["services"]["memcached"], "disconnected");
        assert_eq!(json["services"]["elasticsearch"], "green");
        assert_eq!(json["services"]["grpc"], "connected");
        assert!(json["timestamp"].is_string());
    }
}
