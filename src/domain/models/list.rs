use serde::{Deserialize, Serialize};

/// One page of a paginated API list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Items on this page
    pub data: Vec<T>,

    /// True if another page follows
    #[serde(default)]
    pub has_more: bool,

    /// Absolute URI of the next page
    #[serde(default)]
    pub next_page: Option<String>,

    /// Total matches across every page, for card searches
    #[serde(default)]
    pub total_cards: Option<u64>,

    /// Non-fatal warnings about the request
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Response body of the autocomplete endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Suggested values
    #[serde(default)]
    pub data: Vec<String>,
}
