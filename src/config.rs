use crate::api::Endpoint;
use crate::auction::BidPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3003/api";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings for one client session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub bid_policy: BidPolicy,
    pub api_base_url: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bid_policy: BidPolicy::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("failed to parse config")?;
        if config.api_base_url.trim().is_empty() {
            anyhow::bail!("`apiBaseUrl` must not be empty");
        }
        Ok(config)
    }

    /// Absolute URL of `endpoint` on the configured API
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }
}
