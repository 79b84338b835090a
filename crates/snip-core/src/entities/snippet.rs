use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SnippetPackage, Tag, User};

/// A compiled revision of a snippet against one compiler version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnippetVersion {
    pub version: String,
    pub success: bool,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A shared code snippet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created_by: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub packages: Vec<SnippetPackage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_recommendation: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_upvoted: Option<bool>,
    #[serde(default)]
    pub number_of_upvotes: Option<u64>,
    #[serde(default)]
    pub versions: Vec<SnippetVersion>,
}

/// Ranked free-text completions for the search bar.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}
