//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;

use crate::routes::ApiPrefix;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Versioned prefix shared by every route except the health check.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Allow cross-origin requests from any origin.
    #[serde(default)]
    pub cors_allow_any: bool,

    // === Data ===
    /// JSON file with the initial user list.
    #[serde(default)]
    pub users_file: Option<PathBuf>,

    // === Observability ===
    /// Serve Prometheus metrics on /metrics.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log filter directives in `RUST_LOG` syntax, e.g. `info` or
    /// `user_service=debug,info`.
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    ApiPrefix::V1.to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_allow_any: false,
            users_file: None,
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST {:?} is not an IP address", self.host));
        }

        self.prefix().map_err(|e| format!("API_PREFIX: {}", e))?;

        Ok(())
    }

    /// Parse the configured prefix.
    pub fn prefix(&self) -> Result<ApiPrefix, crate::error::RouteError> {
        ApiPrefix::parse(&self.api_prefix)
    }

    /// Filter directives for the tracing subscriber.
    ///
    /// Verbose mode (from the CLI flag or `VERBOSE`) overrides `RUST_LOG`.
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose || self.verbose {
            "user_service=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| format!("HOST {:?} is not an IP address", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
