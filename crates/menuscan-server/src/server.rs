use std::any::Any;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::config::ServerSettings;
use crate::error::ApiError;
use crate::handlers::{
    dishes::{get_dish, search_dishes},
    health::health_check,
    menu::{get_menu, upload_menu},
    metrics::metrics_handler,
    not_found,
    root::service_descriptor,
};
use crate::middleware::{LoggingLayer, RequestIdLayer};
use crate::state::AppState;

/// Builds the gateway router.
///
/// `/api/v1/dishes/search` is a static segment and always wins over
/// `/api/v1/dishes/{dish_id}`.
pub fn create_router(
    state: AppState,
    prometheus_handle: PrometheusHandle,
    settings: &ServerSettings,
) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(LoggingLayer);

    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    let api_router = Router::new()
        .route("/", get(service_descriptor))
        .route("/api/v1/health", get(health_check))
        .route(
            "/api/v1/menu/upload",
            post(upload_menu).layer(DefaultBodyLimit::max(settings.max_upload_bytes())),
        )
        .route("/api/v1/menu/{menu_id}", get(get_menu))
        .route("/api/v1/dishes/search", get(search_dishes))
        .route("/api/v1/dishes/{dish_id}", get(get_dish))
        .with_state(state);

    let router = Router::new()
        .merge(api_router)
        .merge(metrics_router)
        .fallback(not_found)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ));

    let router = if settings.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    // Panics become a 500 inside the request-id and logging layers, so the
    // response still carries x-request-id.
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware_stack)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %message, "Handler panicked");
    ApiError::Internal.into_response()
}

/// Serves the gateway until SIGINT or SIGTERM.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
    settings: &ServerSettings,
) -> Result<(), std::io::Error> {
    let app = create_router(state, prometheus_handle, settings);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
