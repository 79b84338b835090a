//! Snippet listing and free-text suggestions.

use snip_core::entities::{Paginated, Snippet, SuggestionsResponse};
use snip_search::{BackendQuery, ListingRequest};

use crate::{ApiClient, error::ApiError};

impl ApiClient {
    /// Fetch one page of the snippet listing for a composed request.
    ///
    /// Transport failures and 5xx responses are retried up to the
    /// configured budget; client errors and rate limiting are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if every attempt fails, the API returns a
    /// non-retryable status, or the body is not a snippet page.
    pub async fn get_snippets(
        &self,
        request: &ListingRequest,
    ) -> Result<Paginated<Snippet>, ApiError> {
        let url = self.url("/snippets", &request.to_pairs());
        self.get_json_with_retry(&url).await
    }

    /// Ranked completions for `scope.search`, narrowed by the other filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be parsed.
    pub async fn get_search_suggestions(
        &self,
        scope: &BackendQuery,
    ) -> Result<Vec<String>, ApiError> {
        let url = self.url("/snippets/suggestions", &scope.to_pairs());
        let resp: SuggestionsResponse = self.get_json(&url).await?;
        Ok(resp.suggestions)
    }
}
