//! Test helpers para menuscan-server.
#![allow(dead_code)]

pub mod client;
pub mod fakes;

use std::sync::Arc;
use std::time::Duration;

use menuscan_backends::{CacheStore, MemoryStore};
use menuscan_core::{CacheKey, ResourceKind};
use menuscan_server::cache::CacheAside;
use menuscan_server::config::ServerSettings;
use menuscan_server::health::HealthAggregator;
use menuscan_server::metrics::setup::detached_handle;
use menuscan_server::{AppState, Orchestrator, OrchestratorConfig, create_router};
use serde_json::Value;

pub use client::{MultipartPart, TestClient, TestResponse};
pub use fakes::{FailingStore, FakeIndex, FakeMenuBackend, FixedProbe};

/// A router wired to in-memory doubles, with handles to inspect them.
pub struct TestApp {
    pub client: TestClient,
    pub backend: Arc<FakeMenuBackend>,
    pub index: Arc<FakeIndex>,
    pub store: Arc<dyn CacheStore>,
    pub cache: CacheAside,
}

impl TestApp {
    /// Seeds the cache directly, bypassing the orchestrator.
    pub async fn seed(&self, kind: ResourceKind, id: &str, value: &Value) {
        self.cache
            .set(&CacheKey::new(kind, id), value, Duration::from_secs(3600))
            .await;
    }

    pub async fn cached(&self, kind: ResourceKind, id: &str) -> Option<Value> {
        self.cache.get(&CacheKey::new(kind, id)).await
    }
}

pub fn test_app() -> TestApp {
    test_app_with(
        HealthAggregator::new(Duration::from_secs(1)),
        OrchestratorConfig::default(),
    )
}

pub fn test_app_with(health: HealthAggregator, config: OrchestratorConfig) -> TestApp {
    test_app_over(Arc::new(MemoryStore::new()), health, config)
}

/// Same wiring as [`test_app_with`] but over the given cache store.
pub fn test_app_over(
    store: Arc<dyn CacheStore>,
    health: HealthAggregator,
    config: OrchestratorConfig,
) -> TestApp {
    let backend = Arc::new(FakeMenuBackend::new());
    let index = Arc::new(FakeIndex::new());
    let cache = CacheAside::new(store.clone());

    let orchestrator = Orchestrator::new(cache.clone(), backend.clone(), index.clone(), config);
    let state = AppState::new(orchestrator, health);
    let router = create_router(state, detached_handle(), &ServerSettings::default());

    TestApp {
        client: TestClient::new(router),
        backend,
        index,
        store,
        cache,
    }
}

/// Crea un TestClient con el router por defecto.
pub fn client() -> TestClient {
    test_app().client
}
