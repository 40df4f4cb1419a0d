//! Gatebook API: liveness service entry point.
//!
//! Parses the command line, loads the optional configuration file,
//! initializes tracing, builds the router and starts the HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gatebook_api::config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER};
use gatebook_api::{create_router, start_server};

/// Gatebook API: HTTP liveness service
#[derive(Parser, Debug)]
#[command(name = "gatebook-api", version, about)]
struct Args {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "gatebook_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_tracing(log_filter: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(log_filter));

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    tracing::info!(
        path = ?args.config,
        host = %config.http.host,
        port = config.http.port,
        allow_origins = ?config.http.allow_origins,
        "Loaded configuration"
    );

    let app = create_router(&config.http)?;

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
