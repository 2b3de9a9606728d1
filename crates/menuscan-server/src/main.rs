//! Menuscan gateway binary.

use std::sync::Arc;

use anyhow::Context;
use menuscan_backends::{
    CacheStore, ElasticsearchClient, ElasticsearchConfig, MemcachedProbe, MemoryStore,
    MenuServiceClient, RedisStore, RpcEndpoint,
};
use menuscan_server::cache::CacheAside;
use menuscan_server::health::{
    CacheStoreProbe, HealthAggregator, MemcachedHealthProbe, RpcChannelProbe, SearchClusterProbe,
};
use menuscan_server::metrics::init_metrics;
use menuscan_server::{AppState, GatewayConfig, Orchestrator, OrchestratorConfig, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::load()?;
    let addr = config.socket_addr()?;

    tracing::info!("Starting Menuscan gateway v{}", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = init_metrics().context("failed to install metrics recorder")?;

    let mut health = HealthAggregator::new(config.health.probe_timeout());

    // Primary cache
    let store: Arc<dyn CacheStore> = match config.cache.redis_url() {
        Some(url) => {
            tracing::info!("Connecting to Redis at {}", url);
            let store: Arc<dyn CacheStore> = Arc::new(
                RedisStore::connect(url)
                    .await
                    .with_context(|| format!("failed to connect to Redis at {}", url))?,
            );
            health = health.with_probe(Arc::new(CacheStoreProbe::new(Arc::clone(&store))));
            store
        },
        None => {
            tracing::warn!("No Redis URL configured, using in-process cache");
            Arc::new(MemoryStore::with_capacity(config.cache.memory_capacity))
        },
    };

    // Secondary cache (health only)
    if let Some(addr) = config.cache.memcached_addr() {
        health = health.with_probe(Arc::new(MemcachedHealthProbe::new(MemcachedProbe::new(
            addr,
        ))));
    }

    // Search index
    let search_url = config
        .search
        .url()
        .context("search.url is required")?
        .to_string();
    let index = Arc::new(ElasticsearchClient::new(ElasticsearchConfig {
        url: search_url.clone(),
        index: config.search.index.clone(),
        request_timeout: config.search.timeout(),
    })?);
    health = health.with_probe(Arc::new(SearchClusterProbe::new(index.clone())));
    tracing::info!("Search index: {}/{}", search_url, config.search.index);

    // gRPC channels
    let connect_timeout = config.rpc.connect_timeout();
    let menu_url = config
        .rpc
        .menu_service_url()
        .context("rpc.menu_service_url is required")?;
    let menu_endpoint = RpcEndpoint::new("menu-service", menu_url, connect_timeout)?;
    let mut rpc_endpoints = vec![menu_endpoint.clone()];
    if let Some(image_url) = config.rpc.image_service_url() {
        rpc_endpoints.push(RpcEndpoint::new("image-service", image_url, connect_timeout)?);
    }
    health = health.with_probe(Arc::new(RpcChannelProbe::new(rpc_endpoints)));
    tracing::info!("Menu service: {}", menu_url);

    let orchestrator = Orchestrator::new(
        CacheAside::new(store),
        Arc::new(MenuServiceClient::new(&menu_endpoint)),
        index,
        OrchestratorConfig {
            dish_ttl: config.cache.dish_ttl(),
            max_page_size: config.search.max_page_size,
        },
    );

    let state = AppState::new(orchestrator, health);

    run_server(addr, state, prometheus_handle, &config.server).await?;

    Ok(())
}
