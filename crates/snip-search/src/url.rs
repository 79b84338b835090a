//! Shareable URL encoding of search state.
//!
//! Key contract (both directions must agree on it):
//!
//! | key         | shape                                  | source                       |
//! |-------------|----------------------------------------|------------------------------|
//! | `tags`      | list of tag ids                        | every tag token, in order    |
//! | `userId`    | scalar                                 | the first user token         |
//! | `packages`  | scalar, JSON `[{namespace,name}, ..]`  | every package token, no version |
//! | `versions`  | list                                   | every version token, in order |
//! | `search`    | scalar                                 | trimmed free text, if any    |
//! | `sortBy`    | scalar                                 | sort key, if chosen          |
//! | `sortOrder` | scalar                                 | sort direction, if chosen    |
//!
//! A key with nothing to carry is absent; decoding treats absence as "no
//! filter".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snip_core::{SearchToken, SortBy, SortOrder};

pub const TAGS: &str = "tags";
pub const USER_ID: &str = "userId";
pub const PACKAGES: &str = "packages";
pub const VERSIONS: &str = "versions";
pub const SEARCH: &str = "search";
pub const SORT_BY: &str = "sortBy";
pub const SORT_ORDER: &str = "sortOrder";

/// Keys that are always lists in a query string, bracketed or not.
const LIST_KEYS: [&str; 2] = [TAGS, VERSIONS];

/// A single URL parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlValue {
    Scalar(String),
    List(Vec<String>),
}

/// URL search parameters, ordered by key so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlParams(BTreeMap<String, UrlValue>);

impl UrlParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), UrlValue::Scalar(value.into()));
    }

    pub fn insert_list(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), UrlValue::List(values));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&UrlValue> {
        self.0.get(key)
    }

    /// The value under `key` if it is a scalar.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(UrlValue::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    /// The value under `key` if it is a list.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(UrlValue::List(l)) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Render as a percent-encoded query string without the leading `?`.
    ///
    /// Lists use bracket notation: `tags[]=a&tags[]=b`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            let encoded_key = urlencoding::encode(key);
            match value {
                UrlValue::Scalar(s) => {
                    pairs.push(format!("{encoded_key}={}", urlencoding::encode(s)));
                }
                UrlValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{encoded_key}[]={}", urlencoding::encode(item)));
                    }
                }
            }
        }
        pairs.join("&")
    }

    /// Parse a query string. Accepts a leading `?`, `+` for spaces, and both
    /// `tags[]=x` and repeated `tags=x` for list keys. For scalar keys the
    /// last occurrence wins. Undecodable pairs are skipped.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let (raw_key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
            let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
            else {
                tracing::debug!(segment, "skipping undecodable query pair");
                continue;
            };

            let (key, bracketed) = match key.strip_suffix("[]") {
                Some(stripped) => (stripped.to_string(), true),
                None => (key, false),
            };

            if bracketed || LIST_KEYS.contains(&key.as_str()) {
                match params.0.entry(key).or_insert_with(|| UrlValue::List(Vec::new())) {
                    UrlValue::List(items) => items.push(value),
                    slot @ UrlValue::Scalar(_) => *slot = UrlValue::List(vec![value]),
                }
            } else {
                params.0.insert(key, UrlValue::Scalar(value));
            }
        }
        params
    }
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Search state recovered from URL parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSearch {
    pub tokens: Vec<SearchToken>,
    pub text_search: String,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Serialize)]
struct UrlPackage<'a> {
    namespace: &'a str,
    name: &'a str,
}

/// Encode search state as URL parameters.
///
/// Only the first user token is written; further user tokens are ignored.
/// Package versions are not carried in the URL.
#[must_use]
pub fn tokens_to_url_params(
    tokens: &[SearchToken],
    text_search: &str,
    sort_by: Option<SortBy>,
    sort_order: Option<SortOrder>,
) -> UrlParams {
    let mut params = UrlParams::new();

    let tags: Vec<String> = tokens
        .iter()
        .filter_map(|t| match t {
            SearchToken::Tag(tag) => Some(tag.id.clone()),
            _ => None,
        })
        .collect();
    if !tags.is_empty() {
        params.insert_list(TAGS, tags);
    }

    if let Some(user) = tokens.iter().find_map(|t| match t {
        SearchToken::User(u) => Some(u),
        _ => None,
    }) {
        params.insert_scalar(USER_ID, user.id.clone());
    }

    let packages: Vec<UrlPackage<'_>> = tokens
        .iter()
        .filter_map(|t| match t {
            SearchToken::Package(p) => Some(UrlPackage {
                namespace: &p.namespace,
                name: &p.name,
            }),
            _ => None,
        })
        .collect();
    if !packages.is_empty() {
        match serde_json::to_string(&packages) {
            Ok(json) => params.insert_scalar(PACKAGES, json),
            Err(error) => tracing::warn!(%error, "failed to encode package filters"),
        }
    }

    let versions: Vec<String> = tokens
        .iter()
        .filter_map(|t| match t {
            SearchToken::Version(v) => Some(v.value.clone()),
            _ => None,
        })
        .collect();
    if !versions.is_empty() {
        params.insert_list(VERSIONS, versions);
    }

    let text = text_search.trim();
    if !text.is_empty() {
        params.insert_scalar(SEARCH, text);
    }

    if let Some(sort_by) = sort_by {
        params.insert_scalar(SORT_BY, sort_by.as_str());
    }
    if let Some(sort_order) = sort_order {
        params.insert_scalar(SORT_ORDER, sort_order.as_str());
    }

    params
}

/// Decode URL parameters back into search state.
///
/// Never fails: a malformed `packages` value yields no package tokens and
/// leaves the other keys intact; values of the wrong shape are ignored.
#[must_use]
pub fn url_params_to_tokens(params: &UrlParams) -> DecodedSearch {
    let mut decoded = DecodedSearch::default();

    if let Some(tags) = params.list(TAGS) {
        decoded
            .tokens
            .extend(tags.iter().map(|id| SearchToken::tag(id.clone())));
    }

    if let Some(user_id) = params.scalar(USER_ID) {
        decoded.tokens.push(SearchToken::user(user_id));
    }

    if let Some(packages) = params.scalar(PACKAGES) {
        decoded.tokens.extend(decode_packages(packages));
    }

    if let Some(versions) = params.list(VERSIONS) {
        decoded
            .tokens
            .extend(versions.iter().map(|v| SearchToken::version(v.clone())));
    }

    if let Some(search) = params.scalar(SEARCH) {
        decoded.text_search = search.to_string();
    }

    decoded.sort_by = params.scalar(SORT_BY).and_then(|s| {
        s.parse()
            .map_err(|error| tracing::debug!(%error, "ignoring sortBy from URL"))
            .ok()
    });
    decoded.sort_order = params.scalar(SORT_ORDER).and_then(|s| {
        s.parse()
            .map_err(|error| tracing::debug!(%error, "ignoring sortOrder from URL"))
            .ok()
    });

    decoded
}

fn decode_packages(raw: &str) -> Vec<SearchToken> {
    let items = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!(packages = raw, "packages URL parameter is not a JSON array");
            return Vec::new();
        }
        Err(error) => {
            tracing::warn!(%error, packages = raw, "failed to parse packages from URL");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| {
            let field = |name: &str| item.get(name).and_then(serde_json::Value::as_str);
            let token = match (field("namespace"), field("name")) {
                (Some(namespace), Some(name)) => SearchToken::package(namespace, name).ok(),
                _ => None,
            };
            if token.is_none() {
                tracing::debug!(%item, "skipping malformed package entry");
            }
            token
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_state_encodes_to_nothing() {
        let params = tokens_to_url_params(&[], "   ", None, None);
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn only_first_user_is_encoded() {
        let tokens = [SearchToken::user("u1"), SearchToken::user("u2")];
        let params = tokens_to_url_params(&tokens, "", None, None);
        assert_eq!(params.scalar(USER_ID), Some("u1"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn packages_drop_version_in_url() {
        let tokens = [SearchToken::Package(
            snip_core::PackageToken::new("preview", "cetz")
                .unwrap()
                .pinned("0.3.1")
                .unwrap(),
        )];
        let params = tokens_to_url_params(&tokens, "", None, None);
        assert_eq!(
            params.scalar(PACKAGES),
            Some(r#"[{"namespace":"preview","name":"cetz"}]"#)
        );
    }

    #[test]
    fn sort_passes_through() {
        let params = tokens_to_url_params(&[], "", Some(SortBy::NumberOfUpvotes), Some(SortOrder::Desc));
        assert_eq!(params.scalar(SORT_BY), Some("numberOfUpvotes"));
        assert_eq!(params.scalar(SORT_ORDER), Some("desc"));

        let decoded = url_params_to_tokens(&params);
        assert_eq!(decoded.sort_by, Some(SortBy::NumberOfUpvotes));
        assert_eq!(decoded.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn unknown_sort_values_are_dropped() {
        let mut params = UrlParams::new();
        params.insert_scalar(SORT_BY, "title");
        params.insert_scalar(SORT_ORDER, "sideways");
        let decoded = url_params_to_tokens(&params);
        assert_eq!(decoded.sort_by, None);
        assert_eq!(decoded.sort_order, None);
    }

    #[test]
    fn malformed_package_entries_are_skipped_individually() {
        let mut params = UrlParams::new();
        params.insert_scalar(
            PACKAGES,
            r#"[{"namespace":"core","name":"shapes"},{"namespace":"core"},{"name":""},42,{"namespace":"preview","name":"cetz"}]"#,
        );
        let decoded = url_params_to_tokens(&params);
        assert_eq!(
            decoded.tokens,
            vec![
                SearchToken::package("core", "shapes").unwrap(),
                SearchToken::package("preview", "cetz").unwrap(),
            ]
        );
    }

    #[test]
    fn invalid_packages_json_keeps_other_keys() {
        let mut params = UrlParams::new();
        params.insert_scalar(PACKAGES, "{not valid json");
        params.insert_list(TAGS, vec!["t1".into()]);
        params.insert_scalar(SEARCH, "circle");

        let decoded = url_params_to_tokens(&params);
        assert_eq!(decoded.tokens, vec![SearchToken::tag("t1")]);
        assert_eq!(decoded.text_search, "circle");
    }

    #[test]
    fn wrong_shapes_are_ignored() {
        let mut params = UrlParams::new();
        params.insert_scalar(TAGS, "t1");
        params.insert_list(USER_ID, vec!["u1".into()]);
        params.insert_list(SEARCH, vec!["x".into()]);
        let decoded = url_params_to_tokens(&params);
        assert_eq!(decoded, DecodedSearch::default());
    }

    #[test]
    fn query_string_uses_brackets_for_lists() {
        let tokens = [
            SearchToken::tag("t1"),
            SearchToken::tag("t 2"),
            SearchToken::version("0.13.0"),
        ];
        let qs = tokens_to_url_params(&tokens, "circle grid", None, None).to_query_string();
        assert_eq!(qs, "search=circle%20grid&tags[]=t1&tags[]=t%202&versions[]=0.13.0");
    }

    #[test]
    fn query_string_parse_accepts_both_list_notations() {
        let params = UrlParams::from_query_string("?tags=a&tags%5B%5D=b&versions[]=0.12.0&search=two+words&userId=u1&userId=u2");
        assert_eq!(params.list(TAGS), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(params.list(VERSIONS), Some(&["0.12.0".to_string()][..]));
        assert_eq!(params.scalar(SEARCH), Some("two words"));
        assert_eq!(params.scalar(USER_ID), Some("u2"));
    }

    #[test]
    fn query_string_roundtrip_preserves_packages_json() {
        let tokens = [SearchToken::package("core", "shapes").unwrap()];
        let params = tokens_to_url_params(&tokens, "", None, None);
        let parsed = UrlParams::from_query_string(&params.to_query_string());
        assert_eq!(parsed, params);
    }

    #[test]
    fn query_string_skips_empty_segments() {
        let params = UrlParams::from_query_string("&&search=x&");
        assert_eq!(params.len(), 1);
        assert_eq!(params.scalar(SEARCH), Some("x"));
    }
}
