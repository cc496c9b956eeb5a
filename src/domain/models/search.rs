//! Request parameters for card lookups

use super::image::ImageType;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sort order for card searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Name, A to Z
    Name,
    /// Set and collector number
    Set,
    /// Release date, newest first
    Released,
    /// Rarity, common to mythic
    Rarity,
    /// Color and color identity, WUBRG then multicolor then colorless
    Color,
    /// Lowest USD price, unknown prices last
    Usd,
    /// Lowest TIX price, unknown prices last
    Tix,
    /// Lowest EUR price, unknown prices last
    Eur,
    /// Mana value
    Cmc,
    /// Power
    Power,
    /// Toughness
    Toughness,
    /// EDHREC rank
    Edhrec,
    /// Penny Dreadful rank
    Penny,
    /// Front-face artist
    Artist,
    /// Set review order
    Review,
}

impl Order {
    /// Query-string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Set => "set",
            Self::Released => "released",
            Self::Rarity => "rarity",
            Self::Color => "color",
            Self::Usd => "usd",
            Self::Tix => "tix",
            Self::Eur => "eur",
            Self::Cmc => "cmc",
            Self::Power => "power",
            Self::Toughness => "toughness",
            Self::Edhrec => "edhrec",
            Self::Penny => "penny",
            Self::Artist => "artist",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction applied to an [`Order`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    /// The natural direction of the chosen order
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "asc")]
    #[allow(missing_docs)]
    Ascending,
    #[serde(rename = "desc")]
    #[allow(missing_docs)]
    Descending,
}

impl OrderDirection {
    /// Query-string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// How search results are collapsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueMode {
    /// One result per card name
    #[default]
    Cards,
    /// One result per distinct artwork
    Art,
    /// Every printing
    Prints,
}

impl UniqueMode {
    /// Query-string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Art => "art",
            Self::Prints => "prints",
        }
    }
}

/// Optional parameters of a card search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSearchOptions {
    #[allow(missing_docs)]
    pub unique: Option<UniqueMode>,
    #[allow(missing_docs)]
    pub order: Option<Order>,
    #[allow(missing_docs)]
    pub direction: Option<OrderDirection>,
    /// Include tokens, planes and other extras
    pub include_extras: bool,
    /// Include rare card variants
    pub include_variations: bool,
}

impl CardSearchOptions {
    /// Query parameters for the options that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(unique) = self.unique {
            pairs.push(("unique", unique.as_str()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str()));
        }
        if let Some(direction) = self.direction {
            pairs.push(("dir", direction.as_str()));
        }
        if self.include_extras {
            pairs.push(("include_extras", "true"));
        }
        if self.include_variations {
            pairs.push(("include_variations", "true"));
        }
        pairs
    }
}

/// How a card name is matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Case-insensitive exact match
    Exact(String),
    /// Fuzzy match tolerant of typos and partial words
    Fuzzy(String),
}

impl NameMatch {
    /// The name being matched
    pub fn name(&self) -> &str {
        match self {
            Self::Exact(name) | Self::Fuzzy(name) => name,
        }
    }
}

/// Lookup of a single card by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCardRequest {
    /// Name and matching mode
    pub name: NameMatch,
    /// Restrict to a set code
    pub set: Option<String>,
    /// Face of a multi-face card when requesting an image
    pub face: Option<String>,
    /// Image rendition when requesting an image
    pub version: Option<ImageType>,
}

impl NamedCardRequest {
    /// Exact name lookup
    pub fn exact(name: impl Into<String>) -> Self {
        Self::new(NameMatch::Exact(name.into()))
    }

    /// Fuzzy name lookup
    pub fn fuzzy(name: impl Into<String>) -> Self {
        Self::new(NameMatch::Fuzzy(name.into()))
    }

    const fn new(name: NameMatch) -> Self {
        Self {
            name,
            set: None,
            face: None,
            version: None,
        }
    }

    /// Restrict the lookup to a set
    #[must_use]
    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self
    }

    /// Query parameters for this request
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![match &self.name {
            NameMatch::Exact(name) => ("exact", name.clone()),
            NameMatch::Fuzzy(name) => ("fuzzy", name.clone()),
        }];
        if let Some(set) = &self.set {
            pairs.push(("set", set.clone()));
        }
        if let Some(face) = &self.face {
            pairs.push(("face", face.clone()));
        }
        if let Some(version) = self.version {
            pairs.push(("version", version.as_str().to_string()));
        }
        pairs
    }
}

/// Optional parameters for a random card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomCardOptions {
    /// Restrict candidates to a search query
    pub query: Option<String>,
    /// Face of a multi-face card when requesting an image
    pub face: Option<String>,
    /// Image rendition when requesting an image
    pub version: Option<ImageType>,
}

impl RandomCardOptions {
    /// Query parameters for the options that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("q", query.clone()));
        }
        if let Some(face) = &self.face {
            pairs.push(("face", face.clone()));
        }
        if let Some(version) = self.version {
            pairs.push(("version", version.as_str().to_string()));
        }
        pairs
    }
}

/// One entry of a collection lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum CardIdentifier {
    Id {
        id: Uuid,
    },
    MtgoId {
        mtgo_id: u64,
    },
    MultiverseId {
        multiverse_id: u64,
    },
    OracleId {
        oracle_id: Uuid,
    },
    IllustrationId {
        illustration_id: Uuid,
    },
    /// Collector number within a set
    CollectorNumber {
        set: String,
        collector_number: String,
    },
    /// Name, optionally restricted to a set
    Name {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        set: Option<String>,
    },
}

/// Largest number of identifiers accepted by one collection request
pub const MAX_COLLECTION_IDENTIFIERS: usize = 75;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_only_emit_set_values() {
        assert!(CardSearchOptions::default().query_pairs().is_empty());

        let options = CardSearchOptions {
            unique: Some(UniqueMode::Prints),
            order: Some(Order::Released),
            direction: Some(OrderDirection::Descending),
            include_extras: true,
            include_variations: false,
        };

        assert_eq!(
            options.query_pairs(),
            vec![
                ("unique", "prints"),
                ("order", "released"),
                ("dir", "desc"),
                ("include_extras", "true"),
            ]
        );
    }

    #[test]
    fn test_named_request_pairs() {
        let request = NamedCardRequest::fuzzy("jac bele").with_set("ddc");

        assert_eq!(
            request.query_pairs(),
            vec![("fuzzy", "jac bele".to_string()), ("set", "ddc".to_string())]
        );
        assert_eq!(request.name.name(), "jac bele");
    }

    #[test]
    fn test_identifier_serialization() {
        let identifiers = vec![
            CardIdentifier::MultiverseId {
                multiverse_id: 109_722,
            },
            CardIdentifier::Name {
                name: "Fury Sliver".to_string(),
                set: None,
            },
            CardIdentifier::CollectorNumber {
                set: "tsp".to_string(),
                collector_number: "157".to_string(),
            },
        ];

        let json = serde_json::to_string(&identifiers).unwrap();
        assert_eq!(
            json,
            r#"[{"multiverse_id":109722},{"name":"Fury Sliver"},{"set":"tsp","collector_number":"157"}]"#
        );
    }
}
