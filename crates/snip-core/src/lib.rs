//! # snip-core
//!
//! Core types shared across the snip crates:
//! - Entity structs mirroring the snippet platform's REST payloads
//! - Facet and sort enums with their wire names
//! - The search token union and the owning token list
//! - Cross-cutting error types
//! - The static compiler version list offered by version suggestions
//! - Package import detection in snippet source

pub mod detect;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod token;
pub mod versions;

pub use detect::{PackageDetector, detect_packages};
pub use enums::{Facet, SortBy, SortOrder};
pub use errors::CoreError;
pub use token::{PackageToken, SearchToken, TagToken, TokenList, UserToken, VersionToken};
