//! Gatebook API liveness service.
//!
//! A small axum service answering `GET /health` with `{"status":"ok"}`.
//! The binary in `main.rs` wires configuration, tracing and the listener
//! together; the pieces live here so tests can drive the router directly.

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::{AppConfig, ConfigError};
pub use crate::http::{start_server, ServerError};
pub use routes::create_router;
