//! Debounced suggestion fetching with per-channel cancellation.
//!
//! Each of the five channels (four facets plus free text) has its own
//! debounce window and generation counter. Scheduling a request aborts the
//! channel's previous task, whether it is still waiting out the debounce or
//! already fetching. Results come back over an mpsc channel and are
//! installed only if their generation and query are still current for the
//! channel, so an out-of-order arrival can never overwrite a newer result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use snip_core::Facet;
use snip_core::entities::{PackageRef, Tag, User};
use snip_core::versions::matching_versions;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::BackendQuery;
use crate::error::SearchError;
use crate::resolver::SuggestRequest;

/// Free-text completions shown at most.
pub const TEXT_SUGGESTION_LIMIT: usize = 5;

/// Package lookup filter derived from a `package:` query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageQuery {
    pub namespace: Option<String>,
    pub name: Option<String>,
}

impl PackageQuery {
    /// `ns/name` filters on both, `ns` on the namespace, anything else
    /// browses all packages.
    #[must_use]
    pub fn from_input(query: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let parts: Vec<&str> = query.split('/').collect();
        match parts.as_slice() {
            [namespace, name] => Self {
                namespace: non_empty(namespace),
                name: non_empty(name),
            },
            [namespace] => Self {
                namespace: non_empty(namespace),
                name: None,
            },
            _ => Self::default(),
        }
    }
}

/// Remote lookups backing the suggestion panel.
pub trait SuggestionSource: Send + Sync + 'static {
    /// Tags matching `query`; an empty query browses all.
    fn search_tags(
        &self,
        query: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Tag>, SearchError>> + Send;

    /// Users whose username matches `query`.
    fn search_users(&self, query: &str) -> impl Future<Output = Result<Vec<User>, SearchError>> + Send;

    fn search_packages(
        &self,
        query: &PackageQuery,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<PackageRef>, SearchError>> + Send;

    /// Ranked completions for `scope.search`, restricted by the other filters.
    fn text_suggestions(
        &self,
        scope: &BackendQuery,
    ) -> impl Future<Output = Result<Vec<String>, SearchError>> + Send;
}

/// An independently debounced suggestion stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Tag,
    User,
    Package,
    Version,
    FreeText,
}

impl Channel {
    const ALL: [Self; 5] = [Self::Tag, Self::User, Self::Package, Self::Version, Self::FreeText];

    const fn index(self) -> usize {
        match self {
            Self::Tag => 0,
            Self::User => 1,
            Self::Package => 2,
            Self::Version => 3,
            Self::FreeText => 4,
        }
    }

    #[must_use]
    pub const fn for_facet(facet: Facet) -> Self {
        match facet {
            Facet::Tag => Self::Tag,
            Facet::User => Self::User,
            Facet::Package => Self::Package,
            Facet::Version => Self::Version,
        }
    }
}

/// Rendered candidates for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Suggestions {
    Tags(Vec<Tag>),
    Users(Vec<User>),
    Packages(Vec<PackageRef>),
    Versions(Vec<String>),
    Text(Vec<String>),
}

impl Suggestions {
    #[must_use]
    pub const fn empty(channel: Channel) -> Self {
        match channel {
            Channel::Tag => Self::Tags(Vec::new()),
            Channel::User => Self::Users(Vec::new()),
            Channel::Package => Self::Packages(Vec::new()),
            Channel::Version => Self::Versions(Vec::new()),
            Channel::FreeText => Self::Text(Vec::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Tags(v) => v.len(),
            Self::Users(v) => v.len(),
            Self::Packages(v) => v.len(),
            Self::Versions(v) | Self::Text(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished lookup on its way back to the engine.
#[derive(Debug, Clone)]
pub struct SuggestionUpdate {
    pub channel: Channel,
    pub generation: u64,
    pub key: String,
    pub result: Result<Suggestions, String>,
}

/// What the panel shows for one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelView {
    /// Last applied result. Kept while a newer request loads.
    pub suggestions: Option<Suggestions>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    key: String,
    pending: Option<JoinHandle<()>>,
    view: ChannelView,
}

impl Slot {
    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Schedules suggestion lookups for one search bar.
pub struct SuggestionEngine<S> {
    source: Arc<S>,
    debounce: Duration,
    limit: u32,
    slots: [Slot; 5],
    tx: mpsc::UnboundedSender<SuggestionUpdate>,
    rx: mpsc::UnboundedReceiver<SuggestionUpdate>,
}

impl<S: SuggestionSource> SuggestionEngine<S> {
    #[must_use]
    pub fn new(source: Arc<S>, debounce: Duration, limit: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            debounce,
            limit,
            slots: Default::default(),
            tx,
            rx,
        }
    }

    /// Current panel state for `channel`.
    #[must_use]
    pub fn view(&self, channel: Channel) -> &ChannelView {
        &self.slots[channel.index()].view
    }

    /// Whether any channel is waiting on a lookup.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.slots.iter().any(|s| s.view.loading)
    }

    /// Schedule `request` on its channel after the debounce window,
    /// superseding whatever that channel had in flight. Returns the
    /// request's generation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, request: SuggestRequest) -> u64 {
        let (channel, key) = request_key(&request);
        let slot = &mut self.slots[channel.index()];
        slot.abort_pending();
        slot.generation += 1;
        slot.key.clone_from(&key);
        let generation = slot.generation;

        // User lookups need at least one character.
        if matches!(&request, SuggestRequest::Facet { facet: Facet::User, query } if query.is_empty())
        {
            slot.view = ChannelView {
                suggestions: Some(Suggestions::empty(channel)),
                ..ChannelView::default()
            };
            return generation;
        }

        slot.view.loading = true;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let debounce = self.debounce;
        let limit = self.limit;
        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = fetch(source.as_ref(), &request, limit)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(SuggestionUpdate {
                channel,
                generation,
                key,
                result,
            });
        }));
        generation
    }

    /// Install `update` if it is still the channel's current request.
    /// Returns whether it was applied.
    pub fn apply(&mut self, update: SuggestionUpdate) -> bool {
        let slot = &mut self.slots[update.channel.index()];
        if update.generation != slot.generation || update.key != slot.key {
            tracing::debug!(
                channel = ?update.channel,
                generation = update.generation,
                current = slot.generation,
                "discarding stale suggestions"
            );
            return false;
        }

        slot.pending = None;
        slot.view.loading = false;
        match update.result {
            Ok(suggestions) => {
                slot.view.suggestions = Some(suggestions);
                slot.view.error = None;
            }
            Err(error) => {
                tracing::warn!(channel = ?update.channel, %error, "suggestion lookup failed");
                slot.view.suggestions = Some(Suggestions::empty(update.channel));
                slot.view.error = Some(error);
            }
        }
        true
    }

    /// Wait for the next result and apply it. Returns the channel it was
    /// for, or `None` if it was stale.
    pub async fn next_update(&mut self) -> Option<Channel> {
        let update = self.rx.recv().await?;
        let channel = update.channel;
        self.apply(update).then_some(channel)
    }

    /// Apply results until no channel is loading.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            let Some(update) = self.rx.recv().await else {
                break;
            };
            self.apply(update);
        }
    }

    /// Abort `channel`'s lookup and clear its panel.
    pub fn cancel(&mut self, channel: Channel) {
        let slot = &mut self.slots[channel.index()];
        slot.abort_pending();
        slot.generation += 1;
        slot.key.clear();
        slot.view = ChannelView::default();
    }

    pub fn cancel_all(&mut self) {
        for channel in Channel::ALL {
            self.cancel(channel);
        }
    }
}

impl<S> Drop for SuggestionEngine<S> {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            slot.abort_pending();
        }
    }
}

fn request_key(request: &SuggestRequest) -> (Channel, String) {
    match request {
        SuggestRequest::Facet { facet, query } => (Channel::for_facet(*facet), query.clone()),
        SuggestRequest::FreeText { query } => (
            Channel::FreeText,
            query
                .to_pairs()
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&"),
        ),
    }
}

async fn fetch<S: SuggestionSource>(
    source: &S,
    request: &SuggestRequest,
    limit: u32,
) -> Result<Suggestions, SearchError> {
    match request {
        SuggestRequest::Facet { facet, query } => match facet {
            Facet::Tag => source.search_tags(query, limit).await.map(Suggestions::Tags),
            Facet::User => source.search_users(query).await.map(Suggestions::Users),
            Facet::Package => source
                .search_packages(&PackageQuery::from_input(query), limit)
                .await
                .map(Suggestions::Packages),
            Facet::Version => Ok(Suggestions::Versions(matching_versions(query))),
        },
        SuggestRequest::FreeText { query } => {
            let mut suggestions = source.text_suggestions(query).await?;
            suggestions.truncate(TEXT_SUGGESTION_LIMIT);
            Ok(Suggestions::Text(suggestions))
        }
    }
}
