//! # snip-search
//!
//! Faceted search state for the snippet listing.
//!
//! Search state is an ordered list of typed tokens plus a free-text query
//! and a sort selection. This crate maps that state to and from:
//! - the shareable URL query ([`url`]),
//! - the listing endpoint's query parameters ([`backend`], [`compose`]),
//!
//! and drives the search bar that produces it:
//! - `facet:` prefix recognition ([`prefix`]),
//! - the search bar state machine ([`resolver`]),
//! - debounced, cancellable suggestion fetching with a stale-result guard ([`engine`]),
//! - asynchronous label upgrades for tag and user chips ([`enrich`]).

pub mod backend;
pub mod compose;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod prefix;
pub mod resolver;
pub mod url;

pub use backend::{BackendQuery, PackageFilter, tokens_to_backend_query};
pub use compose::{ListingRequest, SearchState, compose_listing_request, next_page};
pub use engine::{
    Channel, ChannelView, PackageQuery, SuggestionEngine, SuggestionSource, SuggestionUpdate, Suggestions,
};
pub use enrich::{EntityLookup, enrich_tokens};
pub use error::SearchError;
pub use prefix::{ParsedInput, parse_input};
pub use resolver::{Candidate, Key, KeyOutcome, Mode, SearchBar, SuggestRequest};
pub use url::{DecodedSearch, UrlParams, UrlValue, tokens_to_url_params, url_params_to_tokens};
