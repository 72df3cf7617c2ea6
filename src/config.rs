use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::url_builder::DEFAULT_API_BASE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    pub api_key: String,
    /// Vault searched when a command does not name one.
    #[serde(default)]
    pub vault_id: Option<String>,
    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        if config.api_key.trim().is_empty() {
            anyhow::bail!("api_key must not be empty in {}", path);
        }
        Ok(config)
    }

    pub fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        let builder = reqwest::Client::builder().timeout(Duration::from_secs(self.timeout_secs));
        let builder = if let Some(proxy) = &self.proxy {
            builder.proxy(reqwest::Proxy::all(proxy)?)
        } else {
            builder
        };
        Ok(builder.build()?)
    }
}
