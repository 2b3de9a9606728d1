//! Tests de middleware y rutas generales.

mod helpers;

use axum::http::StatusCode;
use helpers::client;
use serde_json::Value;
use uuid::Uuid;

// === Request ID ===

#[tokio::test]
async fn response_includes_request_id() {
    let response = client().get("/").await;

    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn request_id_is_uuid_v4() {
    let response = client().get("/").await;

    let id = response.header("x-request-id").unwrap();
    let parsed = Uuid::parse_str(id).unwrap();

    assert_eq!(parsed.get_version_num(), 4);
}

#[tokio::test]
async fn propagates_incoming_request_id() {
    let custom_id = "my-custom-request-id-12345";

    let response = client()
        .get_with_headers("/api/v1/dishes/search", vec![("x-request-id", custom_id)])
        .await;

    // Present on error responses too
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_header("x-request-id", custom_id);
}

#[tokio::test]
async fn generates_different_ids_for_each_request() {
    let response1 = client().get("/").await;
    let response2 = client().get("/").await;

    assert_ne!(
        response1.header("x-request-id").unwrap(),
        response2.header("x-request-id").unwrap()
    );
}

// === Routes ===

#[tokio::test]
async fn root_describes_service() {
    let response = client().get("/").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["name"], "Menuscan API Gateway");
    assert_eq!(body["endpoints"]["health"], "/api/v1/health");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    client()
        .get("/api/v2/nothing")
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("NOT_FOUND");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let response = client().get("/metrics").await;

    response.assert_status(StatusCode::OK);
    assert!(
        response
            .header("content-type")
            .unwrap()
            .starts_with("text/plain; version=0.0.4")
    );
}
