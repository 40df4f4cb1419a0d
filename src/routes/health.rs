//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with a small JSON body when
//! the process is running. Nothing from the request is read.

use axum::Json;
use serde::Serialize;

/// Body of the liveness response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

impl HealthStatus {
    pub const OK: Self = Self { status: "ok" };
}

/// Health check handler.
///
/// Always answers `{"status":"ok"}`; this is a liveness probe and only checks
/// that the process can respond to HTTP.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::OK)
}
