//! Snippet platform API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:3333/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Listing retries on transport errors and 5xx responses.
const fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    concat!("snip/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root including the version segment, e.g. `https://api.example.com/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Whether the base URL looks like an HTTP(S) endpoint.
    pub fn has_valid_base_url(&self) -> bool {
        self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
    }
}
