use clap::Parser;

pub mod filters;
pub mod global;
pub mod root_commands;

pub use filters::FilterArgs;
pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `snip` binary.
#[derive(Debug, Parser)]
#[command(name = "snip", version, about = "snip - faceted snippet search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use snip_core::{SortBy, SortOrder};

    use super::{Cli, Commands, OutputFormat, root_commands::UrlCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["snip", "--format", "raw", "--verbose", "url", "decode", ""])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Url {
                action: UrlCommands::Decode { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["snip", "search", "--tag", "t1", "--quiet"])
            .expect("cli should parse");
        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn handlers_see_only_the_output_format() {
        let cli = Cli::try_parse_from(["snip", "-q", "-f", "raw", "url", "decode", ""])
            .expect("cli should parse");
        assert!(cli.quiet);
        assert_eq!(cli.global_flags().format, OutputFormat::Raw);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["snip", "--format", "table", "url", "encode"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn filters_parse_repeated_and_typed_values() {
        let cli = Cli::try_parse_from([
            "snip",
            "url",
            "encode",
            "--tag",
            "t1",
            "--tag",
            "t2",
            "--package",
            "preview/cetz@0.3.4",
            "--sort-by",
            "numberOfUpvotes",
            "--sort-order",
            "desc",
        ])
        .expect("cli should parse");

        let Commands::Url {
            action: UrlCommands::Encode(filters),
        } = cli.command
        else {
            panic!("expected url encode");
        };
        assert_eq!(filters.tags, vec!["t1", "t2"]);
        assert_eq!(filters.packages, vec!["preview/cetz@0.3.4"]);
        assert_eq!(filters.sort_by, Some(SortBy::NumberOfUpvotes));
        assert_eq!(filters.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let parsed = Cli::try_parse_from(["snip", "url", "encode", "--sort-by", "title"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn search_paging_flags() {
        let cli = Cli::try_parse_from([
            "snip", "search", "--url", "tags[]=t1", "--page", "3", "--enrich",
        ])
        .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.url.as_deref(), Some("tags[]=t1"));
        assert_eq!(args.page, 3);
        assert!(args.per_page.is_none());
        assert!(args.enrich);
    }

    #[test]
    fn per_page_must_be_positive() {
        let parsed = Cli::try_parse_from(["snip", "search", "--per-page", "0"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["snip", "search", "--per-page", "1"])
            .expect("cli should parse");
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.per_page, Some(1));
    }

    #[test]
    fn detect_takes_path_and_repeated_removals() {
        let cli = Cli::try_parse_from([
            "snip",
            "detect",
            "main.typ",
            "--remove",
            "preview/cetz@0.3.1",
            "--remove",
            "local/shapes@1.0.0",
        ])
        .expect("cli should parse");
        let Commands::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        assert_eq!(args.path, std::path::PathBuf::from("main.typ"));
        assert_eq!(args.removed, vec!["preview/cetz@0.3.1", "local/shapes@1.0.0"]);
    }
}
