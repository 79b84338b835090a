//! Search bar state machine.
//!
//! ```text
//! Idle ──type text──▶ FreeTextSuggest ──type "facet:"──▶ FacetSuggest(facet)
//!   ▲                      │                                  │
//!   └──── clear input ─────┘                                  │
//!   ▲                                                         │
//!   └──── select candidate / backspace on empty facet query ──┘
//! ```
//!
//! Escape and blur only close the panel; the facet stays selected. The bar
//! is synchronous: each transition hands back the [`SuggestRequest`] the
//! caller should pass to the [`SuggestionEngine`](crate::engine::SuggestionEngine).

use serde::Serialize;
use snip_core::entities::{PackageRef, Tag, User};
use snip_core::{CoreError, Facet, SearchToken};

use crate::backend::BackendQuery;
use crate::compose::SearchState;
use crate::prefix::parse_input;

/// Which suggestions the bar is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "facet", rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    FreeTextSuggest,
    FacetSuggest(Facet),
}

/// Keys with behaviour beyond plain text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Escape,
    Enter,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Nothing,
    /// Backspace on an empty facet query dropped the facet.
    LeftFacet,
    /// Backspace on empty input removed the last chip.
    RemovedToken(SearchToken),
    /// Enter committed the free text.
    TextSearch(String),
    PanelClosed,
}

/// A lookup the suggestion engine should schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestRequest {
    Facet { facet: Facet, query: String },
    /// Ranked completions for `query.search`, scoped by the committed filters.
    FreeText { query: BackendQuery },
}

/// A suggestion the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Tag(Tag),
    User(User),
    Package(PackageRef),
    Version(String),
}

impl Candidate {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] for a package with an empty
    /// namespace or name.
    pub fn into_token(self) -> Result<SearchToken, CoreError> {
        match self {
            Self::Tag(tag) => Ok(SearchToken::from_tag(&tag)),
            Self::User(user) => Ok(SearchToken::from_user(&user)),
            Self::Package(package) => SearchToken::from_package(&package),
            Self::Version(version) => Ok(SearchToken::version(version)),
        }
    }
}

/// One search bar and the search state it owns.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    state: SearchState,
    input: String,
    facet_query: String,
    mode: Mode,
    panel_open: bool,
}

impl SearchBar {
    #[must_use]
    pub fn new(state: SearchState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SearchState {
        self.state
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Pending free text (empty while a facet is active).
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn facet_query(&self) -> &str {
        &self.facet_query
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Handle the full contents of the input box after an edit.
    pub fn input_changed(&mut self, value: &str) -> Option<SuggestRequest> {
        let parsed = parse_input(value);
        if let Some(facet) = parsed.prefix {
            self.mode = Mode::FacetSuggest(facet);
            self.facet_query = parsed.query.clone();
            self.input.clear();
            self.panel_open = true;
            return Some(SuggestRequest::Facet {
                facet,
                query: parsed.query,
            });
        }

        self.facet_query.clear();
        self.input = parsed.query;
        if self.input.trim().is_empty() {
            self.mode = Mode::Idle;
            self.panel_open = false;
            None
        } else {
            self.mode = Mode::FreeTextSuggest;
            self.panel_open = true;
            Some(SuggestRequest::FreeText {
                query: self.state.backend_query().with_search(&self.input),
            })
        }
    }

    /// Handle a key press against the current (pre-edit) state.
    pub fn key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Backspace => {
                if matches!(self.mode, Mode::FacetSuggest(_)) {
                    if self.facet_query.is_empty() {
                        self.reset_to_idle();
                        return KeyOutcome::LeftFacet;
                    }
                    return KeyOutcome::Nothing;
                }
                if self.input.is_empty() {
                    return self
                        .state
                        .tokens
                        .pop()
                        .map_or(KeyOutcome::Nothing, KeyOutcome::RemovedToken);
                }
                KeyOutcome::Nothing
            }
            Key::Escape => {
                self.panel_open = false;
                KeyOutcome::PanelClosed
            }
            Key::Enter => {
                let text = self.input.trim();
                if matches!(self.mode, Mode::FacetSuggest(_)) || text.is_empty() {
                    return KeyOutcome::Nothing;
                }
                let text = text.to_string();
                self.state.set_text_search(&text);
                self.panel_open = false;
                KeyOutcome::TextSearch(text)
            }
        }
    }

    pub fn blur(&mut self) {
        self.panel_open = false;
    }

    /// Reopen the panel for whatever mode is active.
    pub fn focus(&mut self) {
        self.panel_open = self.mode != Mode::Idle;
    }

    /// Commit a picked candidate as a token and return to idle.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateUserToken`] when a user filter is
    /// already set, or [`CoreError::InvalidPackage`] for a package with an
    /// empty half. The bar is left unchanged in both cases.
    pub fn select(&mut self, candidate: Candidate) -> Result<SearchToken, CoreError> {
        let token = candidate.into_token()?;
        self.state.tokens.push(token.clone())?;
        self.reset_to_idle();
        self.input.clear();
        Ok(token)
    }

    /// Commit a free-text suggestion as the text search.
    pub fn select_text_suggestion(&mut self, text: &str) {
        self.state.set_text_search(text);
        self.panel_open = false;
    }

    /// Remove the chip at `index`.
    pub fn remove_token(&mut self, index: usize) -> Option<SearchToken> {
        self.state.tokens.remove(index)
    }

    /// Facets whose `facet:` prefix starts with the typed text, offered as
    /// shortcuts while in free-text mode.
    #[must_use]
    pub fn prefix_hints(&self) -> Vec<Facet> {
        if self.mode != Mode::FreeTextSuggest {
            return Vec::new();
        }
        let typed = self.input.to_lowercase();
        Facet::ALL
            .into_iter()
            .filter(|f| f.prefix().starts_with(&typed))
            .collect()
    }

    fn reset_to_idle(&mut self) {
        self.mode = Mode::Idle;
        self.facet_query.clear();
        self.panel_open = false;
    }
}
