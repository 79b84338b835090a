use serde::{Deserialize, Serialize};

/// Pagination block attached to every paged listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default = "first_page")]
    pub first_page: u32,
}

const fn first_page() -> u32 {
    1
}

/// A page of `T` plus its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}
