//! HTTP metrics middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Route label for requests that matched no route.
const FALLBACK_ROUTE: &str = "fallback";

/// Middleware que registra metricas HTTP para cada request.
///
/// Labels are bounded: the route template (`/api/v1/dishes/{dish_id}`, not
/// the concrete id), `fallback` for unmatched paths, and the status class.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(matched_path.as_ref());

    let response = next.run(request).await;
    let class = status_class(response.status());

    counter!(
        "menuscan_http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status_class" => class
    )
    .increment(1);

    histogram!(
        "menuscan_http_request_duration_seconds",
        "method" => method,
        "route" => route,
        "status_class" => class
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Registra las metricas HTTP
pub fn register_http_metrics() {
    metrics::describe_counter!(
        "menuscan_http_requests_total",
        "Total number of HTTP requests"
    );
    metrics::describe_histogram!(
        "menuscan_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
}

fn route_label(matched_path: Option<&MatchedPath>) -> String {
    matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_ROUTE.to_string())
}

/// `2xx`, `4xx`, `5xx`... so each route has a handful of series at most.
fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(StatusCode::OK), "2xx");
        assert_eq!(status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_class(StatusCode::SERVICE_UNAVAILABLE), "5xx");
    }

    #[test]
    fn test_unmatched_route_label() {
        assert_eq!(route_label(None), "fallback");
    }
}
