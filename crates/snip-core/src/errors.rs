//! Cross-cutting error types for snip.
//!
//! Transport errors live in `snip-api` and configuration errors in
//! `snip-config`; the binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised by the token model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A facet name other than `tag`, `user`, `package` or `version`.
    #[error("unknown facet: {0}")]
    UnknownFacet(String),

    /// The listing query honours a single user filter; a second one is refused.
    #[error("a user filter is already set ({existing}); remove it before adding {rejected}")]
    DuplicateUserToken { existing: String, rejected: String },

    /// A package reference that is not `namespace/name`.
    #[error("invalid package reference '{0}': expected namespace/name")]
    InvalidPackage(String),

    /// Data failed validation (format, constraints).
    #[error("validation error: {0}")]
    Validation(String),
}
