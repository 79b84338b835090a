//! Helpers shared by command handlers.

use std::sync::Arc;

use anyhow::Context;
use snip_api::ApiClient;
use snip_config::SnipConfig;
use snip_core::{PackageToken, SearchToken};
use snip_search::SearchState;

use crate::cli::FilterArgs;

/// Load configuration, reading `.env` first.
pub fn load_config() -> anyhow::Result<SnipConfig> {
    SnipConfig::load_with_dotenv().context("failed to load snip configuration")
}

/// Build the shared API client.
pub fn api_client(config: &SnipConfig) -> anyhow::Result<Arc<ApiClient>> {
    let client = ApiClient::new(&config.api)
        .with_context(|| format!("failed to build API client for {}", config.api.base_url))?;
    Ok(Arc::new(client))
}

/// Append the filter flags to `state`.
///
/// Tokens go in flag order: tags, user, packages, versions. Text and sort
/// flags replace whatever `state` carried.
pub fn apply_filters(state: &mut SearchState, filters: &FilterArgs) -> anyhow::Result<()> {
    for id in &filters.tags {
        state.tokens.push(SearchToken::tag(id))?;
    }
    if let Some(id) = &filters.user {
        state
            .tokens
            .push(SearchToken::user(id))
            .context("--user conflicts with the author filter already in --url")?;
    }
    for spec in &filters.packages {
        let package =
            PackageToken::parse(spec).with_context(|| format!("invalid --package '{spec}'"))?;
        state.tokens.push(SearchToken::Package(package))?;
    }
    for version in &filters.versions {
        state.tokens.push(SearchToken::version(version))?;
    }
    if let Some(text) = &filters.text {
        state.set_text_search(text);
    }
    if filters.sort_by.is_some() {
        state.sort_by = filters.sort_by;
    }
    if filters.sort_order.is_some() {
        state.sort_order = filters.sort_order;
    }
    Ok(())
}

/// Search state from filter flags alone.
pub fn state_from_filters(filters: &FilterArgs) -> anyhow::Result<SearchState> {
    let mut state = SearchState::default();
    apply_filters(&mut state, filters)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use snip_core::{Facet, SortOrder};

    use super::*;

    fn filters() -> FilterArgs {
        FilterArgs {
            tags: vec!["t1".into()],
            user: Some("u1".into()),
            packages: vec!["preview/cetz@0.3.4".into()],
            versions: vec!["0.13.0".into()],
            text: Some("  circle ".into()),
            sort_order: Some(SortOrder::Asc),
            ..FilterArgs::default()
        }
    }

    #[test]
    fn filters_become_tokens_in_flag_order() {
        let state = state_from_filters(&filters()).unwrap();
        let facets: Vec<Facet> = state.tokens.iter().map(SearchToken::facet).collect();
        assert_eq!(
            facets,
            vec![Facet::Tag, Facet::User, Facet::Package, Facet::Version]
        );
        assert_eq!(state.text_search, "circle");
        assert_eq!(state.sort_order, Some(SortOrder::Asc));
        assert_eq!(
            state.backend_query().packages[0].version.as_deref(),
            Some("0.3.4")
        );
    }

    #[test]
    fn user_flag_conflicts_with_url_user() {
        let mut state = SearchState::from_query_string("userId=u0");
        let err = apply_filters(&mut state, &filters()).unwrap_err();
        assert!(err.to_string().contains("--user"));
    }

    #[test]
    fn malformed_package_flag_is_an_error() {
        let filters = FilterArgs {
            packages: vec!["cetz".into()],
            ..FilterArgs::default()
        };
        let err = state_from_filters(&filters).unwrap_err();
        assert!(err.to_string().contains("invalid --package 'cetz'"));
    }
}
