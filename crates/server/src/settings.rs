//! # Server Settings
//!
//! Runtime configuration for the HTTP server, loaded from `WAYPOINT_*`
//! environment variables or built programmatically.

use std::path::PathBuf;

/// Server runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    pub host:                  String,
    /// Bind port for the HTTP listener
    pub port:                  u16,
    /// Root directory for report attachment storage
    pub upload_dir:            PathBuf,
    /// Session lifetime in hours
    pub session_ttl_hours:     i64,
    /// TLS certificate path (PEM), if serving HTTPS
    pub tls_cert:              Option<PathBuf>,
    /// TLS private key path (PEM), if serving HTTPS
    pub tls_key:               Option<PathBuf>,
}

impl ServerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host:                  "127.0.0.1".to_string(),
            port:                  8080,
            upload_dir:            PathBuf::from("uploads"),
            session_ttl_hours:     24,
            tls_cert:              None,
            tls_key:               None,
        }
    }

    /// Sets the bind host.
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the attachment storage root.
    #[must_use]
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Sets the session lifetime in hours.
    #[must_use]
    pub fn with_session_ttl_hours(mut self, hours: i64) -> Self {
        self.session_ttl_hours = hours;
        self
    }

    /// Sets the TLS certificate and key paths.
    #[must_use]
    pub fn with_tls(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.tls_cert = Some(cert.into());
        self.tls_key = Some(key.into());
        self
    }

    /// The socket address string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String { format!("{}:{}", self.host, self.port) }

    /// Whether TLS serving is configured.
    #[must_use]
    pub fn tls_enabled(&self) -> bool { self.tls_cert.is_some() && self.tls_key.is_some() }
}

impl Default for ServerConfig {
    fn default() -> Self { Self::new() }
}

/// Loads server configuration from environment variables.
///
/// Reads the following environment variables:
/// - `WAYPOINT_HOST` (default: "127.0.0.1")
/// - `WAYPOINT_PORT` (default: "8080")
/// - `WAYPOINT_UPLOAD_DIR` (default: "uploads")
/// - `WAYPOINT_SESSION_TTL_HOURS` (default: "24")
/// - `WAYPOINT_TLS_CERT` / `WAYPOINT_TLS_KEY` (default: unset)
#[must_use]
pub fn load_config_from_env() -> ServerConfig {
    let get_env = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());

    let mut config = ServerConfig::new()
        .with_host(&get_env("WAYPOINT_HOST", "127.0.0.1"))
        .with_port(get_env("WAYPOINT_PORT", "8080").parse().unwrap_or(8080))
        .with_upload_dir(get_env("WAYPOINT_UPLOAD_DIR", "uploads"))
        .with_session_ttl_hours(get_env("WAYPOINT_SESSION_TTL_HOURS", "24").parse().unwrap_or(24));

    if let (Ok(cert), Ok(key)) = (std::env::var("WAYPOINT_TLS_CERT"), std::env::var("WAYPOINT_TLS_KEY")) {
        config = config.with_tls(cert, key);
    }

    config
}
