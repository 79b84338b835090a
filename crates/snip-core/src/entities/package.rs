use serde::{Deserialize, Serialize};

/// A package identity as returned by the package lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PackageRef {
    pub namespace: String,
    pub name: String,
}

impl PackageRef {
    /// `namespace/name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// A package imported by a snippet, pinned to a version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnippetPackage {
    pub namespace: String,
    pub name: String,
    pub version: String,
}
