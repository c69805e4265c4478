//! Configuration module for SearchScope.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// OAuth bearer token for the Search Console API.
    ///
    /// When absent the service runs against the deterministic mock
    /// provider instead of the real API.
    pub access_token: Option<String>,
    /// How many days Search Console data lags behind today (default: 3).
    ///
    /// The reporting window always ends at `today - data_lag_days`.
    pub data_lag_days: u32,
    /// Optional path to a JSON file listing the monitored sites.
    pub sites_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            access_token: None,
            data_lag_days: 3,
            sites_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SEARCHSCOPE_HTTP_PORT`: HTTP port (default: 8080)
    /// - `SEARCHSCOPE_ACCESS_TOKEN`: Search Console OAuth bearer token
    /// - `SEARCHSCOPE_DATA_LAG_DAYS`: reporting lag in days (default: 3)
    /// - `SEARCHSCOPE_SITES_PATH`: path to a JSON site registry file
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(port_str) = env::var("SEARCHSCOPE_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Ok(token) = env::var("SEARCHSCOPE_ACCESS_TOKEN") {
            if !token.is_empty() {
                cfg.access_token = Some(token);
            }
        }

        if let Ok(lag_str) = env::var("SEARCHSCOPE_DATA_LAG_DAYS") {
            if let Ok(lag) = lag_str.parse() {
                cfg.data_lag_days = lag;
            }
        }

        if let Ok(path) = env::var("SEARCHSCOPE_SITES_PATH") {
            cfg.sites_path = Some(path);
        }

        cfg
    }
}
