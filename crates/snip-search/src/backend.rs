//! Listing endpoint query parameters.
//!
//! Same token mapping as the URL codec, but packages stay structured and
//! keep their pinned version, since this value feeds a typed request
//! builder rather than the address bar.

use serde::{Deserialize, Serialize};
use snip_core::{SearchToken, SortBy, SortOrder};

/// A package filter as the listing endpoint accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageFilter {
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Filter and sort portion of a listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageFilter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl BackendQuery {
    /// Replace the free-text part, dropping it when `text` is blank.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    /// Wire pairs in the listing endpoint's bracket notation:
    /// `tags[]`, `userId`, `packages[i][namespace|name|version]`,
    /// `versions[]`, `search`, `sortBy`, `sortOrder`.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for tag in &self.tags {
            pairs.push(("tags[]".to_string(), tag.clone()));
        }
        if let Some(user_id) = &self.user_id {
            pairs.push(("userId".to_string(), user_id.clone()));
        }
        for (i, package) in self.packages.iter().enumerate() {
            pairs.push((format!("packages[{i}][namespace]"), package.namespace.clone()));
            pairs.push((format!("packages[{i}][name]"), package.name.clone()));
            if let Some(version) = &package.version {
                pairs.push((format!("packages[{i}][version]"), version.clone()));
            }
        }
        for version in &self.versions {
            pairs.push(("versions[]".to_string(), version.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.as_str().to_string()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sortOrder".to_string(), sort_order.as_str().to_string()));
        }
        pairs
    }
}

/// Build the listing query from search state. Only the first user token is read.
#[must_use]
pub fn tokens_to_backend_query(
    tokens: &[SearchToken],
    text_search: &str,
    sort_by: Option<SortBy>,
    sort_order: Option<SortOrder>,
) -> BackendQuery {
    let mut query = BackendQuery {
        sort_by,
        sort_order,
        ..BackendQuery::default()
    };

    for token in tokens {
        match token {
            SearchToken::Tag(t) => query.tags.push(t.id.clone()),
            SearchToken::User(u) => {
                if query.user_id.is_none() {
                    query.user_id = Some(u.id.clone());
                }
            }
            SearchToken::Package(p) => query.packages.push(PackageFilter {
                namespace: p.namespace.clone(),
                name: p.name.clone(),
                version: p.version.clone(),
            }),
            SearchToken::Version(v) => query.versions.push(v.value.clone()),
        }
    }

    query.with_search(text_search)
}
