//! Tag lookup.

use snip_core::entities::{Paginated, Tag};

use crate::{ApiClient, error::ApiError};

impl ApiClient {
    /// Page through tags, optionally filtered by a name search.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be parsed.
    pub async fn get_tags(
        &self,
        search: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<Tag>, ApiError> {
        let mut pairs = vec![
            ("page".to_string(), page.to_string()),
            ("perPage".to_string(), per_page.to_string()),
        ];
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        self.get_json(&self.url("/tags", &pairs)).await
    }

    /// Resolve tag ids to full tags. Unknown ids are simply absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be parsed.
    pub async fn get_tags_by_ids(&self, ids: &[String]) -> Result<Vec<Tag>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let pairs: Vec<_> = ids
            .iter()
            .map(|id| ("ids[]".to_string(), id.clone()))
            .collect();
        self.get_json(&self.url("/tags/by-ids", &pairs)).await
    }
}
