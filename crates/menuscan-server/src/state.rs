//! Application state.

use std::sync::Arc;

use crate::health::HealthAggregator;
use crate::orchestrator::Orchestrator;

/// State shared across all handlers. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
    health: Arc<HealthAggregator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, health: HealthAggregator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            health: Arc::new(health),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn health(&self) -> &HealthAggregator {
        &self.health
    }
}
