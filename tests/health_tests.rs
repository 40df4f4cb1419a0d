//! Router-level tests for the liveness endpoint.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use gatebook_api::config::HttpServerConfig;
use gatebook_api::create_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    create_router(&HttpServerConfig::default()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = get(test_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_bytes(response).await;
    assert_eq!(&body[..], br#"{"status":"ok"}"#);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_is_not_cached() {
    let response = get(test_app(), "/health").await;
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn test_health_is_idempotent() {
    let app = test_app();

    let mut bodies = Vec::new();
    for _ in 0..5 {
        let response = get(app.clone(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(body_bytes(response).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_health_ignores_query_string() {
    let app = test_app();

    let plain = body_bytes(get(app.clone(), "/health").await).await;

    let response = get(app, "/health?x=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, plain);
}

#[tokio::test]
async fn test_health_ignores_headers_and_body() {
    let app = test_app();

    let plain = body_bytes(get(app.clone(), "/health").await).await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .header("x-arbitrary", "something")
                .header(header::ACCEPT, "text/html")
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .body(Body::from("unexpected request body"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_bytes(response).await, plain);
}

#[tokio::test]
async fn test_head_health_has_empty_body() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::HEAD)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_not_ok() {
    let response = get(test_app(), "/nope").await;

    assert_ne!(response.status(), StatusCode::OK);
    assert!(!response.status().is_server_error());
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_to_health_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_echoes_configured_origin() {
    let config = HttpServerConfig {
        allow_origins: vec!["https://app.example.com".to_string()],
        ..HttpServerConfig::default()
    };
    let app = create_router(&config).unwrap();

    let allowed = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://app.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example.com"
    );
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    let other = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
    assert!(other
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
