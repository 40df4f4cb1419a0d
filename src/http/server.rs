//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid listen address: {0}")]
    InvalidAddress(#[from] ConfigError),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind a TCP listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
///
/// Each connection runs on its own task; once `shutdown` fires the listener
/// stops accepting and in-flight requests are allowed to finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.socket_addr()?;
    let listener = bind(addr).await?;

    let local_addr = listener.local_addr().unwrap_or(addr);
    tracing::info!(addr = %local_addr, "Listening");

    serve(listener, app, shutdown::shutdown_signal()).await
}
