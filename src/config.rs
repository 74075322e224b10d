use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Where the Feddit backend lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub host: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8080".to_string(),
            api_version: "/api/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    /// `host` without its trailing slash, followed by `api_version`.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), self.api_version)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub route_prefix: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            route_prefix: "/api/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Days before `end_date` used when a date range query omits `start_date`.
    pub default_lookback_days: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_lookback_days: 7,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var("FEDDIT_SENTIMENT_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            let config_text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path))?;
            Self::from_toml(&config_text).with_context(|| format!("Failed to parse {}", path))?
        } else {
            warn!("{} not found, using built-in defaults", path);
            Self::default()
        };

        config.apply_env()?;
        info!(
            "Upstream: {} (timeout {}s), routes under {}",
            config.upstream.base_url(),
            config.upstream.timeout_secs,
            config.web.route_prefix
        );

        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("FEDDIT_HOST") {
            self.upstream.host = host;
        }
        if let Ok(version) = std::env::var("FEDDIT_API_VERSION") {
            self.upstream.api_version = version;
        }
        if let Ok(prefix) = std::env::var("API_MAIN_PATH") {
            self.web.route_prefix = prefix;
        }
        if let Ok(days) = std::env::var("API_SUBFEDDIT_DEFAULT_START_RANGE") {
            self.filter.default_lookback_days = days
                .parse()
                .context("API_SUBFEDDIT_DEFAULT_START_RANGE must be a non-negative integer")?;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.web.port = port.parse().context("PORT must be a valid port number")?;
        }

        Ok(())
    }
}
