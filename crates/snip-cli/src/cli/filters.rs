use clap::Args;
use snip_core::{SortBy, SortOrder};

/// Search filters shared by `url encode`, `search` and `suggest`.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Tag id (repeatable).
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<String>,

    /// Author user id. Only one author filter is allowed.
    #[arg(long = "user", value_name = "ID")]
    pub user: Option<String>,

    /// Package as `namespace/name`, optionally pinned with `@version` (repeatable).
    #[arg(long = "package", value_name = "NS/NAME[@VERSION]")]
    pub packages: Vec<String>,

    /// Compiler version (repeatable).
    #[arg(long = "version", value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Free-text search.
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Sort key: createdAt, updatedAt, numberOfUpvotes
    #[arg(long)]
    pub sort_by: Option<SortBy>,

    /// Sort direction: asc, desc
    #[arg(long)]
    pub sort_order: Option<SortOrder>,
}
