use anyhow::Context;
use serde::Serialize;
use snip_core::entities::{PaginationMeta, Snippet};
use snip_core::token::SearchToken;
use snip_search::{ListingRequest, SearchState, compose_listing_request, enrich_tokens};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::{api_client, apply_filters, load_config};
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenView {
    #[serde(flatten)]
    token: SearchToken,
    label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    /// Shareable query string for this search.
    url: String,
    tokens: Vec<TokenView>,
    request: ListingRequest,
    snippets: Vec<Snippet>,
    meta: PaginationMeta,
    next_page: Option<u32>,
}

/// Handle `snip search`.
pub async fn handle(args: &SearchArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;

    let mut state = search_state(args)?;
    if args.enrich {
        let labelled = enrich_tokens(client.as_ref(), &mut state.tokens).await;
        tracing::debug!(labelled, "resolved token labels");
    }

    let per_page = args.per_page.unwrap_or(config.search.page_size);
    let request = compose_listing_request(&state, args.page, per_page);
    tracing::debug!(key = %request.cache_key(), "fetching listing");
    let page = client
        .get_snippets(&request)
        .await
        .context("snippet listing failed")?;

    let response = SearchResponse {
        url: state.to_url_params().to_query_string(),
        tokens: state
            .tokens
            .iter()
            .map(|token| TokenView {
                label: token.display_value().into_owned(),
                token: token.clone(),
            })
            .collect(),
        next_page: request.next(&page.meta).map(|next| next.page),
        request,
        snippets: page.data,
        meta: page.meta,
    };
    output(&response, flags.format)
}

/// `--url` state, if any, with the filter flags layered on top.
fn search_state(args: &SearchArgs) -> anyhow::Result<SearchState> {
    let mut state = args
        .url
        .as_deref()
        .map(SearchState::from_query_string)
        .unwrap_or_default();
    apply_filters(&mut state, &args.filters)?;
    Ok(state)
}
