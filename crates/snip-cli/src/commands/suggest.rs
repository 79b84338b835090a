use serde::Serialize;
use snip_core::Facet;
use snip_search::{
    Channel, ChannelView, Mode, SearchBar, SuggestRequest, SuggestionEngine,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SuggestArgs;
use crate::commands::shared::{api_client, load_config, state_from_filters};
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestResponse {
    mode: Mode,
    query: String,
    /// `facet:` shortcuts matching the typed text.
    prefix_hints: Vec<&'static str>,
    channel: Option<Channel>,
    #[serde(flatten)]
    view: ChannelView,
}

/// Handle `snip suggest`.
///
/// Feeds the input to a fresh search bar, waits out the debounce window
/// and prints what the panel would show.
pub async fn handle(args: &SuggestArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = load_config()?;
    let client = api_client(&config)?;

    let mut bar = SearchBar::new(state_from_filters(&args.filters)?);
    let request = bar.input_changed(&args.input);
    let channel = request.as_ref().map(channel_for);

    let mut engine = SuggestionEngine::new(
        client,
        config.search.debounce(),
        config.search.suggestion_limit,
    );
    if let Some(request) = request {
        engine.schedule(request);
        engine.settle().await;
    }

    let query = match bar.mode() {
        Mode::FacetSuggest(_) => bar.facet_query().to_string(),
        Mode::FreeTextSuggest | Mode::Idle => bar.input().to_string(),
    };
    let response = SuggestResponse {
        mode: bar.mode(),
        query,
        prefix_hints: bar.prefix_hints().into_iter().map(Facet::prefix).collect(),
        view: channel
            .map(|c| engine.view(c).clone())
            .unwrap_or_default(),
        channel,
    };
    output(&response, flags.format)
}

const fn channel_for(request: &SuggestRequest) -> Channel {
    match request {
        SuggestRequest::Facet { facet, .. } => Channel::for_facet(*facet),
        SuggestRequest::FreeText { .. } => Channel::FreeText,
    }
}
