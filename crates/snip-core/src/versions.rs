//! Compiler versions a snippet can target.

/// Newest first.
pub const TYPST_VERSIONS: &[&str] = &["0.14.1", "0.14.0", "0.13.1", "0.13.0", "0.12.0"];

/// Versions containing `query` (case-insensitive). An empty query keeps them all.
#[must_use]
pub fn matching_versions(query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    TYPST_VERSIONS
        .iter()
        .filter(|v| v.to_lowercase().contains(&needle))
        .map(|v| (*v).to_string())
        .collect()
}
