use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub menu: &'static str,
    pub dishes: &'static str,
    pub metrics: &'static str,
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        Self {
            name: "Menuscan API Gateway",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: Endpoints {
                health: "/api/v1/health",
                menu: "/api/v1/menu",
                dishes: "/api/v1/dishes",
                metrics: "/metrics",
            },
        }
    }
}

pub async fn service_descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::default())
}
