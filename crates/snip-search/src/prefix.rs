//! `facet:` prefix recognition for raw search-bar input.

use snip_core::Facet;

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Result of classifying raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// The facet being typed, or `None` for free text.
    pub prefix: Option<Facet>,
    /// Trimmed facet query, or the untouched input for free text.
    pub query: String,
}

/// Classify `raw` as a facet query (`tag:foo`) or free text.
///
/// The prefix must start the input and is case-sensitive. An empty
/// remainder still selects the facet. The remainder stops at the first line
/// terminator (`\n`, `\r`, U+2028 or U+2029). Unknown prefixes such as
/// `author:` are free text.
#[must_use]
pub fn parse_input(raw: &str) -> ParsedInput {
    for facet in Facet::ALL {
        if let Some(rest) = raw.strip_prefix(facet.prefix()) {
            let line = rest.split(LINE_TERMINATORS).next().unwrap_or_default();
            return ParsedInput {
                prefix: Some(facet),
                query: line.trim().to_string(),
            };
        }
    }
    ParsedInput {
        prefix: None,
        query: raw.to_string(),
    }
}
