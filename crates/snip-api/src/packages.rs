//! Package lookup.

use snip_core::entities::{PackageRef, Paginated};
use snip_search::PackageQuery;

use crate::{ApiClient, error::ApiError};

impl ApiClient {
    /// Page through packages, narrowed by namespace and/or name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be parsed.
    pub async fn get_packages(
        &self,
        query: &PackageQuery,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<PackageRef>, ApiError> {
        self.get_json(&self.url("/packages", &package_pairs(query, page, per_page)))
            .await
    }
}

fn package_pairs(query: &PackageQuery, page: u32, per_page: u32) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("page".to_string(), page.to_string()),
        ("limit".to_string(), per_page.to_string()),
    ];
    if let Some(namespace) = query.namespace.as_deref().filter(|s| !s.is_empty()) {
        pairs.push(("namespace".to_string(), namespace.to_string()));
    }
    if let Some(name) = query.name.as_deref().filter(|s| !s.is_empty()) {
        pairs.push(("name".to_string(), name.to_string()));
    }
    pairs
}
