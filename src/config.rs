//! Configuration loading and constants.
//!
//! The service runs with no configuration file at all: every key has a default
//! that reproduces the fixed contract (all interfaces, port 8080, any origin).
//! A TOML file passed with `--config` can override the listener address, the
//! allowed CORS origins and the log format.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use const_format::formatcp;
use http::HeaderValue;
use serde::Deserialize;

// =============================================================================
// Listener Defaults
// =============================================================================

/// Bind on all interfaces unless configured otherwise
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Fixed liveness port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Origin wildcard accepted in `http.allow_origins`
pub const ANY_ORIGIN: &str = "*";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Liveness answers must never be served from an intermediary cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Logging
// =============================================================================

/// Log target of this crate, used to build the default filter
pub const LOG_TARGET: &str = "gatebook_api";

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=info,tower_http=info", LOG_TARGET);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Origins allowed by CORS. `["*"]` allows any origin without credentials.
    #[serde(default = "HttpServerConfig::default_allow_origins")]
    pub allow_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            allow_origins: Self::default_allow_origins(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_allow_origins() -> Vec<String> {
        vec![ANY_ORIGIN.to_string()]
    }

    /// Resolve the configured host and port into a socket address.
    ///
    /// The host is an IP literal; IPv6 addresses are written bare (`"::"`),
    /// and a bracketed form (`"[::]"`) is accepted too.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.trim();
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        let ip: IpAddr = host.parse().map_err(|e| {
            ConfigError::Validation(format!("Invalid http.host {:?}: {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured origins with surrounding whitespace removed.
    fn origins(&self) -> impl Iterator<Item = &str> {
        self.allow_origins.iter().map(|o| o.trim())
    }

    /// True when the wildcard origin is configured.
    pub fn allows_any_origin(&self) -> bool {
        self.origins().any(|o| o == ANY_ORIGIN)
    }

    /// Explicit origins as header values, for credentialed CORS.
    ///
    /// Returns an empty list when any origin is allowed.
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        if self.allows_any_origin() {
            return Ok(Vec::new());
        }

        self.origins()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::Validation(format!("Invalid origin in http.allow_origins: {origin:?}"))
                })
            })
            .collect()
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr()?;

        if self.http.allow_origins.is_empty() {
            return Err(ConfigError::Validation(
                "http.allow_origins must list at least one origin or \"*\"".to_string(),
            ));
        }

        if self.http.allows_any_origin() && self.http.allow_origins.len() > 1 {
            return Err(ConfigError::Validation(
                "http.allow_origins cannot mix \"*\" with explicit origins".to_string(),
            ));
        }
        self.http.origin_header_values()?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
