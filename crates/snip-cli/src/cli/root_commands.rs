use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::FilterArgs;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert between filters and shareable URL query strings.
    Url {
        #[command(subcommand)]
        action: UrlCommands,
    },
    /// Run a listing search against the API.
    Search(SearchArgs),
    /// Show what the search bar would suggest for typed input.
    Suggest(SuggestArgs),
    /// List the packages a snippet source file imports.
    Detect(DetectArgs),
}

/// `snip url` subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum UrlCommands {
    /// Encode filters as a query string.
    Encode(FilterArgs),
    /// Decode a query string into tokens, text and sort.
    Decode {
        /// Query string, with or without the leading `?`.
        query: String,
    },
}

/// Arguments for `snip search`.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Start from a shared query string; filter flags are added on top.
    #[arg(long, value_name = "QUERY")]
    pub url: Option<String>,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size (defaults to `search.page_size` from config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,

    /// Resolve tag and user ids to display labels.
    #[arg(long)]
    pub enrich: bool,
}

/// Arguments for `snip suggest`.
#[derive(Clone, Debug, Args)]
pub struct SuggestArgs {
    /// Text as typed into the search bar, e.g. `tag:gra` or `circle`.
    pub input: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for `snip detect`.
#[derive(Clone, Debug, Args)]
pub struct DetectArgs {
    /// Snippet source file, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Drop a detected package, as `namespace/name@version` (repeatable).
    #[arg(long = "remove", value_name = "NS/NAME@VERSION")]
    pub removed: Vec<String>,
}
