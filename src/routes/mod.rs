//! HTTP route handlers.
//!
//! The only route is the liveness probe. Request tracing is enabled via
//! middleware that generates a unique request ID for each incoming request,
//! and CORS follows `http.allow_origins`.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{ConfigError, HttpServerConfig, CACHE_CONTROL_HEALTH};
use crate::middleware::request_id_layer;

/// Build the CORS layer for the configured origins.
///
/// The wildcard allows any origin, method and header without credentials.
/// An explicit origin list enables credentials and mirrors the requested
/// method and headers, since wildcards are not allowed alongside credentials.
pub fn cors_layer(config: &HttpServerConfig) -> Result<CorsLayer, ConfigError> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config.origin_header_values()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Creates the Axum router with the health route and ambient layers.
pub fn create_router(config: &HttpServerConfig) -> Result<Router, ConfigError> {
    // Health check - never cached, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Ok(Router::new()
        .merge(health_routes)
        .layer(cors_layer(config)?)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer)))
}
