//! Search state ownership and listing request composition.

use serde::Serialize;
use snip_core::entities::PaginationMeta;
use snip_core::{SortBy, SortOrder, TokenList};

use crate::backend::{BackendQuery, tokens_to_backend_query};
use crate::url::{UrlParams, tokens_to_url_params, url_params_to_tokens};

/// Everything the listing page knows about the active search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub tokens: TokenList,
    pub text_search: String,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl SearchState {
    /// Rebuild state from URL parameters, replacing any previous tokens.
    #[must_use]
    pub fn from_url_params(params: &UrlParams) -> Self {
        let decoded = url_params_to_tokens(params);
        Self {
            tokens: TokenList::from_tokens(decoded.tokens),
            text_search: decoded.text_search,
            sort_by: decoded.sort_by,
            sort_order: decoded.sort_order,
        }
    }

    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        Self::from_url_params(&UrlParams::from_query_string(query))
    }

    #[must_use]
    pub fn to_url_params(&self) -> UrlParams {
        tokens_to_url_params(
            self.tokens.as_slice(),
            &self.text_search,
            self.sort_by,
            self.sort_order,
        )
    }

    #[must_use]
    pub fn backend_query(&self) -> BackendQuery {
        tokens_to_backend_query(
            self.tokens.as_slice(),
            &self.text_search,
            self.sort_by,
            self.sort_order,
        )
    }

    pub fn set_text_search(&mut self, text: &str) {
        self.text_search = text.trim().to_string();
    }
}

/// One page request against the listing endpoint.
///
/// Equal inputs compose to equal values, so a request doubles as its own
/// cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    #[serde(flatten)]
    pub filters: BackendQuery,
    pub page: u32,
    pub per_page: u32,
}

impl ListingRequest {
    /// Wire pairs: `page`, `perPage`, then the filter pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
        ];
        pairs.extend(self.filters.to_pairs());
        pairs
    }

    /// Percent-encoded query string. Brackets in keys stay literal.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Stable string key for caching and deduplication.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("snippets?{}", self.to_query_string())
    }

    /// The request for the following page, if there is one.
    #[must_use]
    pub fn next(&self, meta: &PaginationMeta) -> Option<Self> {
        next_page(meta).map(|page| Self {
            page,
            ..self.clone()
        })
    }
}

/// Compose the listing request for `page` of the current search.
///
/// Pages are 1-based; `0` is treated as the first page.
#[must_use]
pub fn compose_listing_request(state: &SearchState, page: u32, per_page: u32) -> ListingRequest {
    ListingRequest {
        filters: state.backend_query(),
        page: page.max(1),
        per_page,
    }
}

/// Next page number, or `None` on the last page.
#[must_use]
pub const fn next_page(meta: &PaginationMeta) -> Option<u32> {
    if meta.current_page < meta.last_page {
        Some(meta.current_page + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snip_core::SearchToken;
    use std::collections::HashSet;

    fn state() -> SearchState {
        SearchState {
            tokens: TokenList::from_tokens([
                SearchToken::tag("t1"),
                SearchToken::version("0.13.0"),
            ]),
            text_search: "circle".into(),
            sort_by: Some(SortBy::NumberOfUpvotes),
            sort_order: Some(SortOrder::Desc),
        }
    }

    fn meta(current: u32, last: u32) -> PaginationMeta {
        PaginationMeta {
            total: 0,
            per_page: 10,
            current_page: current,
            last_page: last,
            first_page: 1,
        }
    }

    #[test]
    fn identical_inputs_compose_equal_requests() {
        let a = compose_listing_request(&state(), 2, 10);
        let b = compose_listing_request(&state().clone(), 2, 10);
        assert_eq!(a, b);
        assert_eq!(a.cache_key(), b.cache_key());

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn any_difference_changes_the_key() {
        let base = compose_listing_request(&state(), 1, 10);
        assert_ne!(base, compose_listing_request(&state(), 2, 10));

        let mut other = state();
        other.sort_order = Some(SortOrder::Asc);
        assert_ne!(base.cache_key(), compose_listing_request(&other, 1, 10).cache_key());
    }

    #[test]
    fn cache_key_renders_pairs() {
        let request = compose_listing_request(&state(), 1, 10);
        assert_eq!(
            request.cache_key(),
            "snippets?page=1&perPage=10&tags[]=t1&versions[]=0.13.0&search=circle&sortBy=numberOfUpvotes&sortOrder=desc"
        );
    }

    #[test]
    fn page_zero_is_first_page() {
        assert_eq!(compose_listing_request(&SearchState::default(), 0, 20).page, 1);
    }

    #[test]
    fn next_page_stops_at_last() {
        assert_eq!(next_page(&meta(1, 3)), Some(2));
        assert_eq!(next_page(&meta(3, 3)), None);

        let request = compose_listing_request(&state(), 1, 10);
        assert_eq!(request.next(&meta(1, 2)).map(|r| r.page), Some(2));
        assert!(request.next(&meta(2, 2)).is_none());
    }

    #[test]
    fn state_roundtrips_through_query_string() {
        let original = state();
        let restored = SearchState::from_query_string(&original.to_url_params().to_query_string());
        assert_eq!(restored, original);
    }

    #[test]
    fn set_text_search_trims() {
        let mut s = SearchState::default();
        s.set_text_search("  grid ");
        assert_eq!(s.text_search, "grid");
    }
}
