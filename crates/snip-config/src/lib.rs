//! # snip-config
//!
//! Layered configuration loading for snip using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SNIP_*` prefix, `__` as separator)
//! 2. Project-level `.snip/config.toml`
//! 3. User-level `~/.config/snip/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SNIP_API__BASE_URL` -> `api.base_url`,
//! `SNIP_SEARCH__DEBOUNCE_MS` -> `search.debounce_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use snip_config::SnipConfig;
//!
//! let config = SnipConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod search;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnipConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl SnipConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".snip/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SNIP_").split("__"))
    }

    /// Reject values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.has_valid_base_url() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' is not an http(s) URL", self.api.base_url),
            });
        }
        if self.search.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.search.suggestion_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.suggestion_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("snip").join("config.toml"))
    }
}
