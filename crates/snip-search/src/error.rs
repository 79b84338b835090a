//! Search error types for snip-search.

/// Errors from suggestion lookups and search bar actions.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The token model refused the change.
    #[error(transparent)]
    Core(#[from] snip_core::CoreError),

    /// A remote lookup (tags, users, packages, suggestions) failed.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// The suggestion task ended without producing a result.
    #[error("suggestion task aborted: {0}")]
    Aborted(String),
}
