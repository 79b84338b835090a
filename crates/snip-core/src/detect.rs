//! Package detection in snippet source.
//!
//! Snippet bodies pull packages in with lines such as
//! `#import "@preview/cetz:0.3.1": canvas`. The editor pre-fills the
//! snippet's package list from those lines; the author may dismiss entries,
//! and a dismissed entry stays hidden until the dismissals are cleared.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::PackageToken;

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*#?import\s+"@([^/]+)/([^:]+):([^"]+)""#)
        .expect("Invalid package import regex pattern")
});

/// Every pinned package imported by `code`, first occurrence first.
#[must_use]
pub fn detect_packages(code: &str) -> Vec<PackageToken> {
    PackageDetector::default().detect(code)
}

/// Identity of a detected package: `namespace/name:version`.
#[must_use]
pub fn detection_key(package: &PackageToken) -> String {
    format!(
        "{}/{}:{}",
        package.namespace,
        package.name,
        package.version.as_deref().unwrap_or_default()
    )
}

/// Import scanner that remembers packages the author dismissed.
#[derive(Clone, Debug, Default)]
pub struct PackageDetector {
    removed: HashSet<String>,
}

impl PackageDetector {
    /// Scan `code`, skipping duplicates and dismissed packages.
    #[must_use]
    pub fn detect(&self, code: &str) -> Vec<PackageToken> {
        let mut seen = HashSet::new();
        IMPORT_PATTERN
            .captures_iter(code)
            .filter_map(|caps| {
                let package = PackageToken::new(&caps[1], &caps[2])
                    .and_then(|package| package.pinned(&caps[3]))
                    .ok()?;
                let key = detection_key(&package);
                (!self.removed.contains(&key) && seen.insert(key)).then_some(package)
            })
            .collect()
    }

    /// Hide `package` from later scans.
    pub fn remove(&mut self, package: &PackageToken) {
        self.removed.insert(detection_key(package));
    }

    /// Forget every dismissal.
    pub fn clear_removed(&mut self) {
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn pinned(namespace: &str, name: &str, version: &str) -> PackageToken {
        PackageToken::new(namespace, name)
            .unwrap()
            .pinned(version)
            .unwrap()
    }

    #[rstest]
    #[case::plain_import(
        "#import \"@preview/cetz:0.3.1\": canvas",
        vec![("preview", "cetz", "0.3.1")]
    )]
    #[case::without_hash("import \"@preview/cetz:0.3.1\"", vec![("preview", "cetz", "0.3.1")])]
    #[case::leading_spaces("    #import \"@local/shapes:1.0.0\"", vec![("local", "shapes", "1.0.0")])]
    #[case::leading_tab("\t#import \"@local/shapes:1.0.0\"", vec![("local", "shapes", "1.0.0")])]
    #[case::duplicates_collapse(
        "#import \"@preview/cetz:0.3.1\"\n#import \"@preview/cetz:0.3.1\": draw",
        vec![("preview", "cetz", "0.3.1")]
    )]
    #[case::versions_are_distinct(
        "#import \"@preview/cetz:0.3.1\"\n#import \"@preview/cetz:0.2.0\"",
        vec![("preview", "cetz", "0.3.1"), ("preview", "cetz", "0.2.0")]
    )]
    #[case::first_seen_order(
        "#import \"@b/two:1\"\n#import \"@a/one:1\"\n#import \"@b/two:1\"",
        vec![("b", "two", "1"), ("a", "one", "1")]
    )]
    #[case::mid_line_ignored("#let x = 1 #import \"@preview/cetz:0.3.1\"", vec![])]
    #[case::relative_import("#import \"utils.typ\": helper", vec![])]
    #[case::missing_version("#import \"@preview/cetz\"", vec![])]
    #[case::other_directive("#include \"@preview/cetz:0.3.1\"", vec![])]
    #[case::empty_source("", vec![])]
    fn detects_imports(#[case] code: &str, #[case] expected: Vec<(&str, &str, &str)>) {
        let expected: Vec<PackageToken> = expected
            .into_iter()
            .map(|(namespace, name, version)| pinned(namespace, name, version))
            .collect();
        assert_eq!(detect_packages(code), expected);
    }

    #[test]
    fn removed_packages_stay_hidden_until_cleared() {
        let code = "#import \"@preview/cetz:0.3.1\"\n#import \"@local/shapes:1.0.0\"";
        let mut detector = PackageDetector::default();

        detector.remove(&pinned("preview", "cetz", "0.3.1"));
        assert_eq!(detector.detect(code), vec![pinned("local", "shapes", "1.0.0")]);

        detector.clear_removed();
        assert_eq!(detector.detect(code).len(), 2);
    }

    #[test]
    fn removal_is_per_version() {
        let code = "#import \"@preview/cetz:0.3.1\"\n#import \"@preview/cetz:0.2.0\"";
        let mut detector = PackageDetector::default();
        detector.remove(&pinned("preview", "cetz", "0.3.1"));
        assert_eq!(detector.detect(code), vec![pinned("preview", "cetz", "0.2.0")]);
    }

    #[test]
    fn detection_key_joins_all_three_parts() {
        assert_eq!(
            detection_key(&pinned("preview", "cetz", "0.3.1")),
            "preview/cetz:0.3.1"
        );
    }
}
