use crate::error::{Result, VizError};
use serde::Deserialize;

/// Application configuration for the CLI: where the data endpoint lives and
/// how fetches behave. Loaded from an optional `predchart` config file plus
/// `PREDCHART_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the data endpoint.
    #[serde(default = "default_data_url")]
    pub data_url: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

fn default_data_url() -> String {
    "http://localhost:3000/api/v1".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_cache_capacity() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = config::Config::builder()
            .add_source(config::File::with_name("predchart").required(false))
            .add_source(config::Environment::with_prefix("PREDCHART"))
            .build()
            .map_err(|e| VizError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| VizError::Config(e.to_string()))
    }
}
