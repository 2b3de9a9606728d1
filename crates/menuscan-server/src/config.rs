//! Gateway configuration.
//!
//! Values come from an optional `menuscan.toml` (or any format the `config`
//! crate recognizes under that base name), overridden by environment
//! variables prefixed with `MENUSCAN__`, e.g. `MENUSCAN__SERVER__PORT=9000`
//! or `MENUSCAN__CACHE__REDIS_URL=redis://cache:6379`.
//!
//! Setting an endpoint to the empty string leaves that dependency
//! unconfigured; the health check then reports it as `disconnected`.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use menuscan_core::search::DEFAULT_MAX_LIMIT;

/// Errores de carga de configuracion
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid bind address {addr}: {reason}")]
    InvalidAddress { addr: String, reason: String },
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub search: SearchSettings,
    pub rpc: RpcSettings,
    pub health: HealthSettings,
}

impl GatewayConfig {
    /// Loads `menuscan.*` from the working directory, then `MENUSCAN__*`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("menuscan")
    }

    /// Loads from the given file base name, then the environment.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("MENUSCAN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.bind_addr, self.server.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddress {
            addr: addr.clone(),
            reason: e.to_string(),
        })
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub port: u16,
    /// Upload body limit in MiB.
    pub max_upload_mb: usize,
    pub enable_cors: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_mb: 10,
            enable_cors: true,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

/// Cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Primary cache. When unset, an in-process store is used instead.
    pub redis_url: Option<String>,
    /// Secondary cache, probed for health only (`host:port`).
    pub memcached_addr: Option<String>,
    /// TTL for dishes written through after a backend fetch.
    pub dish_ttl_secs: u64,
    /// Capacity of the in-process fallback store.
    pub memory_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            redis_url: Some("redis://localhost:6379".to_string()),
            memcached_addr: Some("localhost:11211".to_string()),
            dish_ttl_secs: 3600,
            memory_capacity: 10_000,
        }
    }
}

impl CacheSettings {
    pub fn redis_url(&self) -> Option<&str> {
        non_empty(&self.redis_url)
    }

    pub fn memcached_addr(&self) -> Option<&str> {
        non_empty(&self.memcached_addr)
    }

    pub fn dish_ttl(&self) -> Duration {
        Duration::from_secs(self.dish_ttl_secs)
    }
}

/// Search index settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub url: Option<String>,
    pub index: String,
    /// Largest accepted `limit`.
    pub max_page_size: u64,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: Some("http://localhost:9200".to_string()),
            index: "dishes".to_string(),
            max_page_size: DEFAULT_MAX_LIMIT,
            timeout_secs: 10,
        }
    }
}

impl SearchSettings {
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// gRPC endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    pub menu_service_url: Option<String>,
    pub image_service_url: Option<String>,
    pub connect_timeout_secs: u64,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            menu_service_url: Some("http://localhost:50051".to_string()),
            image_service_url: Some("http://localhost:50052".to_string()),
            connect_timeout_secs: 5,
        }
    }
}

impl RpcSettings {
    pub fn menu_service_url(&self) -> Option<&str> {
        non_empty(&self.menu_service_url)
    }

    pub fn image_service_url(&self) -> Option<&str> {
        non_empty(&self.image_service_url)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Health check settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    /// Upper bound for each dependency probe.
    pub probe_timeout_ms: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 2000,
        }
    }
}

impl HealthSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
