//! API error types.

use thiserror::Error;

/// Errors that can occur when talking to the snippet platform.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The body's `message`, the raw body, or the status reason.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured base URL is unusable.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Transport failures and 5xx responses are worth another attempt;
    /// client errors, rate limiting and bad bodies are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => !(e.is_decode() || e.is_builder() || e.is_status()),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } | Self::Parse(_) | Self::InvalidBaseUrl(_) => false,
        }
    }
}

impl From<ApiError> for snip_search::SearchError {
    fn from(error: ApiError) -> Self {
        Self::Lookup(error.to_string())
    }
}
