//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub client: ClientConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Allowed CORS origins, comma separated
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Company store configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON file with the companies to load at startup
    pub seed_path: Option<String>,
}

/// Admin backend client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the admin backend (e.g. "http://127.0.0.1:8080")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Pricing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// GST applied to credit purchases, in percent
    #[serde(default = "default_gst_percent")]
    pub gst_percent: Decimal,

    /// Margin prefilled on a freshly started rate draft
    #[serde(default = "default_margin_percent")]
    pub default_margin_percent: Decimal,
}

fn default_gst_percent() -> Decimal {
    Decimal::from(18)
}

fn default_margin_percent() -> Decimal {
    Decimal::from(20)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            gst_percent: default_gst_percent(),
            default_margin_percent: default_margin_percent(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("client.base_url", default_base_url())?
            .set_default("client.timeout_secs", 30)?
            .set_default("pricing.gst_percent", "18")?
            .set_default("pricing.default_margin_percent", "20")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with WAP_ prefix
            .add_source(
                Environment::with_prefix("WAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
