//! Tests del endpoint de salud.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use helpers::{FixedProbe, test_app_with};
use menuscan_core::{Dependency, DependencyStatus};
use menuscan_server::OrchestratorConfig;
use menuscan_server::health::HealthAggregator;
use serde_json::Value;

fn aggregator(statuses: &[(Dependency, DependencyStatus)]) -> HealthAggregator {
    statuses.iter().fold(
        HealthAggregator::new(Duration::from_secs(1)),
        |agg, (dep, status)| agg.with_probe(Arc::new(FixedProbe(*dep, status.clone()))),
    )
}

#[tokio::test]
async fn all_connected_is_healthy_200() {
    let app = test_app_with(
        aggregator(&[
            (Dependency::Redis, DependencyStatus::Connected),
            (Dependency::Memcached, DependencyStatus::Connected),
            (
                Dependency::Elasticsearch,
                DependencyStatus::Cluster("green".to_string()),
            ),
            (Dependency::Grpc, DependencyStatus::Connected),
        ]),
        OrchestratorConfig::default(),
    );

    let response = app.client.get("/api/v1/health").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["redis"], "connected");
    assert_eq!(body["services"]["elasticsearch"], "green");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn one_error_is_degraded_503() {
    let app = test_app_with(
        aggregator(&[
            (Dependency::Redis, DependencyStatus::Connected),
            (Dependency::Memcached, DependencyStatus::Error),
            (
                Dependency::Elasticsearch,
                DependencyStatus::Cluster("green".to_string()),
            ),
            (Dependency::Grpc, DependencyStatus::Connected),
        ]),
        OrchestratorConfig::default(),
    );

    let response = app.client.get("/api/v1/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["memcached"], "error");
    assert_eq!(body["services"]["redis"], "connected");
}

#[tokio::test]
async fn red_cluster_and_missing_probes_degrade() {
    let app = test_app_with(
        aggregator(&[(
            Dependency::Elasticsearch,
            DependencyStatus::Cluster("red".to_string()),
        )]),
        OrchestratorConfig::default(),
    );

    let response = app.client.get("/api/v1/health").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert_eq!(body["services"]["elasticsearch"], "red");
    assert_eq!(body["services"]["grpc"], "disconnected");
    assert_eq!(body["services"].as_object().unwrap().len(), 4);
}
