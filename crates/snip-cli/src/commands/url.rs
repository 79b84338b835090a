use serde::Serialize;
use snip_search::{DecodedSearch, SearchState, UrlParams, url_params_to_tokens};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UrlCommands;
use crate::commands::shared::state_from_filters;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EncodeResponse {
    query: String,
    params: UrlParams,
}

/// Handle `snip url`.
pub fn handle(action: &UrlCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UrlCommands::Encode(filters) => {
            let state = state_from_filters(filters)?;
            output(&encode(&state), flags.format)
        }
        UrlCommands::Decode { query } => output(&decode(query), flags.format),
    }
}

fn encode(state: &SearchState) -> EncodeResponse {
    let params = state.to_url_params();
    EncodeResponse {
        query: params.to_query_string(),
        params,
    }
}

fn decode(query: &str) -> DecodedSearch {
    url_params_to_tokens(&UrlParams::from_query_string(query))
}
