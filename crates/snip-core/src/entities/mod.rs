//! Entity structs mirroring the snippet platform's REST payloads.
//!
//! All structs use `camelCase` field names on the wire. Optional fields the
//! backend omits on some endpoints default to `None`.

mod package;
mod pagination;
mod snippet;
mod tag;
mod user;

pub use package::{PackageRef, SnippetPackage};
pub use pagination::{Paginated, PaginationMeta};
pub use snippet::{Snippet, SnippetVersion, SuggestionsResponse};
pub use tag::Tag;
pub use user::User;
