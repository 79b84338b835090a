//! Search tokens: one structured filter per chip in the search bar.
//!
//! Each facet carries its own payload, so a package token always holds its
//! namespace and name and its composite value is derived from them rather
//! than stored beside them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::entities::{PackageRef, Tag, User};
use crate::enums::Facet;
use crate::errors::CoreError;

/// Filter on a tag id. `name` arrives with the resolved tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagToken {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Filter on an author id. `username` arrives with the resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserToken {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Filter on a package, optionally pinned to one version.
///
/// Namespace and name are never empty, and a pin is never an empty string.
/// Every constructor and deserialization checks this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPackageToken")]
pub struct PackageToken {
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Deserialize)]
struct RawPackageToken {
    namespace: String,
    name: String,
    #[serde(default)]
    version: Option<String>,
}

impl TryFrom<RawPackageToken> for PackageToken {
    type Error = CoreError;

    fn try_from(raw: RawPackageToken) -> Result<Self, Self::Error> {
        let token = Self::new(raw.namespace, raw.name)?;
        match raw.version {
            Some(version) => token.pinned(version),
            None => Ok(token),
        }
    }
}

impl PackageToken {
    /// Unpinned package filter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] when either half is empty.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, CoreError> {
        let (namespace, name) = (namespace.into(), name.into());
        if namespace.is_empty() || name.is_empty() {
            return Err(CoreError::InvalidPackage(format!("{namespace}/{name}")));
        }
        Ok(Self {
            namespace,
            name,
            version: None,
        })
    }

    /// Pin to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] when `version` is empty.
    pub fn pinned(mut self, version: impl Into<String>) -> Result<Self, CoreError> {
        let version = version.into();
        if version.is_empty() {
            return Err(CoreError::InvalidPackage(format!("{}@", self.qualified_name())));
        }
        self.version = Some(version);
        Ok(self)
    }

    /// Parse `namespace/name` or `namespace/name@version`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] when either half is empty,
    /// the slash is missing or the pin is empty.
    pub fn parse(spec: &str) -> Result<Self, CoreError> {
        let spec = spec.trim();
        let invalid = || CoreError::InvalidPackage(spec.to_string());
        let (path, version) = match spec.split_once('@') {
            Some((path, version)) => (path, Some(version)),
            None => (spec, None),
        };
        let (namespace, name) = path.split_once('/').ok_or_else(invalid)?;
        let token = Self::new(namespace, name).map_err(|_| invalid())?;
        match version {
            Some(v) => token.pinned(v).map_err(|_| invalid()),
            None => Ok(token),
        }
    }

    /// `namespace/name`, the package filter's canonical value.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Filter on a compiler version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionToken {
    pub value: String,
}

/// One committed filter in the active search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchToken {
    Tag(TagToken),
    User(UserToken),
    Package(PackageToken),
    Version(VersionToken),
}

impl SearchToken {
    /// Unresolved tag filter; its label is the id until enriched.
    #[must_use]
    pub fn tag(id: impl Into<String>) -> Self {
        Self::Tag(TagToken {
            id: id.into(),
            name: None,
        })
    }

    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(UserToken {
            id: id.into(),
            username: None,
        })
    }

    /// Unpinned package filter.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] when either half is empty.
    pub fn package(
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, CoreError> {
        PackageToken::new(namespace, name).map(Self::Package)
    }

    #[must_use]
    pub fn version(value: impl Into<String>) -> Self {
        Self::Version(VersionToken {
            value: value.into(),
        })
    }

    #[must_use]
    pub fn from_tag(tag: &Tag) -> Self {
        Self::Tag(TagToken {
            id: tag.id.clone(),
            name: Some(tag.name.clone()),
        })
    }

    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::User(UserToken {
            id: user.id.clone(),
            username: Some(user.username.clone()),
        })
    }

    /// Package filter for a looked-up package.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPackage`] when the lookup returned an
    /// empty namespace or name.
    pub fn from_package(package: &PackageRef) -> Result<Self, CoreError> {
        Self::package(package.namespace.clone(), package.name.clone())
    }

    #[must_use]
    pub const fn facet(&self) -> Facet {
        match self {
            Self::Tag(_) => Facet::Tag,
            Self::User(_) => Facet::User,
            Self::Package(_) => Facet::Package,
            Self::Version(_) => Facet::Version,
        }
    }

    /// The canonical filter value: tag id, user id, `namespace/name`, or
    /// version string.
    #[must_use]
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Self::Tag(t) => Cow::Borrowed(&t.id),
            Self::User(u) => Cow::Borrowed(&u.id),
            Self::Package(p) => Cow::Owned(p.qualified_name()),
            Self::Version(v) => Cow::Borrowed(&v.value),
        }
    }

    /// Chip label. Falls back to the raw value until enrichment lands.
    #[must_use]
    pub fn display_value(&self) -> Cow<'_, str> {
        match self {
            Self::Tag(TagToken { name: Some(n), .. })
            | Self::User(UserToken {
                username: Some(n), ..
            }) => Cow::Borrowed(n),
            _ => self.value(),
        }
    }

    /// Whether the label still shows a raw id.
    #[must_use]
    pub const fn needs_enrichment(&self) -> bool {
        matches!(
            self,
            Self::Tag(TagToken { name: None, .. }) | Self::User(UserToken { username: None, .. })
        )
    }
}

/// Ordered token list owned by one search bar.
///
/// Order matters for display only. Removal is positional, so two tokens
/// with the same value are still addressed independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<SearchToken>", into = "Vec<SearchToken>")]
pub struct TokenList {
    tokens: Vec<SearchToken>,
}

impl TokenList {
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Build a list from decoded tokens, keeping only the first user token.
    #[must_use]
    pub fn from_tokens(tokens: impl IntoIterator<Item = SearchToken>) -> Self {
        let mut list = Self::new();
        for token in tokens {
            if let Err(error) = list.push(token) {
                tracing::warn!(%error, "dropping token while rebuilding search state");
            }
        }
        list
    }

    /// Append a token.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateUserToken`] if a user token is already
    /// present; the listing query can only filter on one author.
    pub fn push(&mut self, token: SearchToken) -> Result<(), CoreError> {
        if let SearchToken::User(incoming) = &token
            && let Some(existing) = self.user()
        {
            return Err(CoreError::DuplicateUserToken {
                existing: existing.id.clone(),
                rejected: incoming.id.clone(),
            });
        }
        self.tokens.push(token);
        Ok(())
    }

    /// Remove the token at `index`.
    pub fn remove(&mut self, index: usize) -> Option<SearchToken> {
        (index < self.tokens.len()).then(|| self.tokens.remove(index))
    }

    pub fn pop(&mut self) -> Option<SearchToken> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SearchToken] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchToken> {
        self.tokens.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The user filter, if one is set.
    #[must_use]
    pub fn user(&self) -> Option<&UserToken> {
        self.tokens.iter().find_map(|t| match t {
            SearchToken::User(u) => Some(u),
            _ => None,
        })
    }

    /// Ids of tag tokens whose label has not been resolved yet.
    #[must_use]
    pub fn unresolved_tag_ids(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                SearchToken::Tag(TagToken { id, name: None }) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Upgrade tag labels from resolved tags. Returns how many tokens changed.
    pub fn label_tags(&mut self, tags: &[Tag]) -> usize {
        let mut changed = 0;
        for token in &mut self.tokens {
            if let SearchToken::Tag(t) = token
                && let Some(tag) = tags.iter().find(|tag| tag.id == t.id)
                && t.name.as_deref() != Some(tag.name.as_str())
            {
                t.name = Some(tag.name.clone());
                changed += 1;
            }
        }
        changed
    }

    /// Upgrade the user token's label. Returns whether it changed.
    pub fn label_user(&mut self, user: &User) -> bool {
        for token in &mut self.tokens {
            if let SearchToken::User(u) = token
                && u.id == user.id
                && u.username.as_deref() != Some(user.username.as_str())
            {
                u.username = Some(user.username.clone());
                return true;
            }
        }
        false
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a SearchToken;
    type IntoIter = std::slice::Iter<'a, SearchToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<SearchToken>> for TokenList {
    fn from(tokens: Vec<SearchToken>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<TokenList> for Vec<SearchToken> {
    fn from(list: TokenList) -> Self {
        list.tokens
    }
}

impl AsRef<[SearchToken]> for TokenList {
    fn as_ref(&self) -> &[SearchToken] {
        &self.tokens
    }
}
