use serde::{Deserialize, Serialize};
use std::path::Path;

use wxgate_core::upstream::DEFAULT_METAR_STATION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind the server to
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// User allow-list, a JSON array or object of UUID strings
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Icon classification table, a JSON object of category -> conditions
    #[serde(default = "default_icon_classes_file")]
    pub icon_classes_file: String,

    /// How long a cached response stays valid
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Timeout applied to every upstream HTTP call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// METAR station fetched by the metar source
    #[serde(default = "default_metar_station")]
    pub metar_station: String,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_users_file() -> String {
    "data/users.json".to_string()
}

fn default_icon_classes_file() -> String {
    "data/icon_classes.json".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    1800
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_metar_station() -> String {
    DEFAULT_METAR_STATION.to_string()
}

fn default_enable_cors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            users_file: default_users_file(),
            icon_classes_file: default_icon_classes_file(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            metar_station: default_metar_station(),
            enable_cors: default_enable_cors(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file falls back to
    /// defaults; a malformed one is a startup error.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path, e))?;

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
