//! Search bar and listing configuration.

use serde::{Deserialize, Serialize};

/// Trailing-edge debounce for suggestion lookups.
const fn default_debounce_ms() -> u64 {
    300
}

/// Snippets per listing page.
const fn default_page_size() -> u32 {
    10
}

/// Candidates requested per facet lookup.
const fn default_suggestion_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}
