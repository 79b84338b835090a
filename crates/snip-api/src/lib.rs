//! # snip-api
//!
//! HTTP client for the snippet platform's REST API.
//!
//! Covers the endpoints the search experience consumes:
//! - `GET /snippets`: paginated listing, filtered by the composed search
//! - `GET /snippets/suggestions`: ranked free-text completions
//! - `GET /tags`, `GET /tags/by-ids`: tag lookup and label resolution
//! - `GET /users`, `GET /users/{id}`: author lookup and label resolution
//! - `GET /packages`: package lookup by namespace and name
//!
//! The client is built once from [`snip_config::ApiConfig`] and shared
//! behind an `Arc`; it implements the search crate's
//! [`SuggestionSource`](snip_search::SuggestionSource) and
//! [`EntityLookup`](snip_search::EntityLookup) seams.

pub mod packages;
pub mod snippets;
pub mod tags;
pub mod users;

mod error;
mod http;

pub use error::ApiError;

use std::time::Duration;

use serde::de::DeserializeOwned;
use snip_config::ApiConfig;
use snip_core::entities::{PackageRef, Tag, User};
use snip_search::{BackendQuery, EntityLookup, PackageQuery, SearchError, SuggestionSource};

use crate::http::{RETRY_BACKOFF, build_url, check_response};

/// HTTP client for the snippet platform.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the base URL is not http(s),
    /// or [`ApiError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if !config.has_valid_base_url() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, pairs: &[(String, String)]) -> String {
        build_url(&self.base_url, path, pairs)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(url, "GET");
        let resp = check_response(self.http.get(url).send().await?).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `get_json` with bounded retries on transport errors and 5xx.
    async fn get_json_with_retry<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match self.get_json(url).await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!(url, attempt, %error, "retrying request");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl SuggestionSource for ApiClient {
    async fn search_tags(&self, query: &str, limit: u32) -> Result<Vec<Tag>, SearchError> {
        let search = (!query.is_empty()).then_some(query);
        Ok(self.get_tags(search, 1, limit).await?.data)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, SearchError> {
        self.get_users(Some(query)).await.map_err(Into::into)
    }

    async fn search_packages(
        &self,
        query: &PackageQuery,
        limit: u32,
    ) -> Result<Vec<PackageRef>, SearchError> {
        Ok(self.get_packages(query, 1, limit).await?.data)
    }

    async fn text_suggestions(&self, scope: &BackendQuery) -> Result<Vec<String>, SearchError> {
        self.get_search_suggestions(scope).await.map_err(Into::into)
    }
}

impl EntityLookup for ApiClient {
    async fn tags_by_ids(&self, ids: &[String]) -> Result<Vec<Tag>, SearchError> {
        self.get_tags_by_ids(ids).await.map_err(Into::into)
    }

    async fn user_by_id(&self, id: &str) -> Result<User, SearchError> {
        self.get_user(id).await.map_err(Into::into)
    }
}
