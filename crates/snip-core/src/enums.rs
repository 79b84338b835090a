//! Facet and sort enums for snip.
//!
//! Every enum carries an `as_str()` returning the exact name used on the
//! wire (URL keys, prefix syntax, listing query values). `FromStr` accepts
//! only those names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Facet
// ---------------------------------------------------------------------------

/// Category of a structured filter and of the `facet:` input prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Tag,
    User,
    Package,
    Version,
}

impl Facet {
    /// All facets, in the order the prefix hints are offered.
    pub const ALL: [Self; 4] = [Self::Tag, Self::User, Self::Package, Self::Version];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::User => "user",
            Self::Package => "package",
            Self::Version => "version",
        }
    }

    /// The input prefix that activates this facet, e.g. `tag:`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Tag => "tag:",
            Self::User => "user:",
            Self::Package => "package:",
            Self::Version => "version:",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(Self::Tag),
            "user" => Ok(Self::User),
            "package" => Ok(Self::Package),
            "version" => Ok(Self::Version),
            other => Err(CoreError::UnknownFacet(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SortBy
// ---------------------------------------------------------------------------

/// Listing sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    CreatedAt,
    UpdatedAt,
    NumberOfUpvotes,
}

impl SortBy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::NumberOfUpvotes => "numberOfUpvotes",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "numberOfUpvotes" => Ok(Self::NumberOfUpvotes),
            other => Err(CoreError::Validation(format!("unknown sort key '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Listing sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CoreError::Validation(format!("unknown sort order '{other}'"))),
        }
    }
}
