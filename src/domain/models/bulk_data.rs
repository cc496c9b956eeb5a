//! Bulk data dump descriptors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kinds of bulk dump published by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkDataKind {
    /// One card per Oracle identity
    OracleCards,
    /// One card per unique artwork
    UniqueArtwork,
    /// Every card in English or the printed language
    DefaultCards,
    /// Every card object in every language
    AllCards,
    /// Every ruling
    Rulings,
}

impl BulkDataKind {
    /// Every known kind
    pub const ALL: [Self; 5] = [
        Self::OracleCards,
        Self::UniqueArtwork,
        Self::DefaultCards,
        Self::AllCards,
        Self::Rulings,
    ];

    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OracleCards => "oracle_cards",
            Self::UniqueArtwork => "unique_artwork",
            Self::DefaultCards => "default_cards",
            Self::AllCards => "all_cards",
            Self::Rulings => "rulings",
        }
    }
}

impl fmt::Display for BulkDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkDataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown bulk data kind: {s}"))
    }
}

/// Metadata and download location of one bulk dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDataInfo {
    #[allow(missing_docs)]
    pub id: Uuid,

    /// Dump kind, kept as a string so new kinds still parse
    #[serde(rename = "type")]
    pub kind: String,

    /// When the dump was last regenerated
    pub updated_at: DateTime<Utc>,

    #[allow(missing_docs)]
    pub name: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub description: String,

    /// Download location of the JSON array
    pub download_uri: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    #[allow(missing_docs)]
    pub content_type: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub content_encoding: String,
}

impl BulkDataInfo {
    /// Parsed kind; `None` for kinds this client does not know
    pub fn known_kind(&self) -> Option<BulkDataKind> {
        self.kind.parse().ok()
    }
}

/// Bulk dumps grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct BulkDataSources {
    pub oracle_cards: Option<BulkDataInfo>,
    pub unique_artwork: Option<BulkDataInfo>,
    pub default_cards: Option<BulkDataInfo>,
    pub all_cards: Option<BulkDataInfo>,
    pub rulings: Option<BulkDataInfo>,
}

impl BulkDataSources {
    /// Dump of the given kind, if published
    pub const fn get(&self, kind: BulkDataKind) -> Option<&BulkDataInfo> {
        match kind {
            BulkDataKind::OracleCards => self.oracle_cards.as_ref(),
            BulkDataKind::UniqueArtwork => self.unique_artwork.as_ref(),
            BulkDataKind::DefaultCards => self.default_cards.as_ref(),
            BulkDataKind::AllCards => self.all_cards.as_ref(),
            BulkDataKind::Rulings => self.rulings.as_ref(),
        }
    }

    /// Every published dump
    pub fn iter(&self) -> impl Iterator<Item = &BulkDataInfo> {
        BulkDataKind::ALL.into_iter().filter_map(|kind| self.get(kind))
    }

    fn slot(&mut self, kind: BulkDataKind) -> &mut Option<BulkDataInfo> {
        match kind {
            BulkDataKind::OracleCards => &mut self.oracle_cards,
            BulkDataKind::UniqueArtwork => &mut self.unique_artwork,
            BulkDataKind::DefaultCards => &mut self.default_cards,
            BulkDataKind::AllCards => &mut self.all_cards,
            BulkDataKind::Rulings => &mut self.rulings,
        }
    }
}

impl FromIterator<BulkDataInfo> for BulkDataSources {
    fn from_iter<I: IntoIterator<Item = BulkDataInfo>>(iter: I) -> Self {
        let mut sources = Self::default();
        for info in iter {
            if let Some(kind) = info.known_kind() {
                *sources.slot(kind) = Some(info);
            }
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(kind: &str) -> BulkDataInfo {
        serde_json::from_value(serde_json::json!({
            "object": "bulk_data",
            "id": "27bf3214-1271-490b-bdfe-c0be6c23d02e",
            "type": kind,
            "updated_at": "2024-05-01T09:03:17.263+00:00",
            "name": kind,
            "download_uri": format!("https://data.example.test/{kind}.json"),
            "size": 1024,
        }))
        .unwrap()
    }

    #[test]
    fn test_group_by_kind() {
        let sources: BulkDataSources = vec![info("rulings"), info("oracle_cards"), info("mystery")]
            .into_iter()
            .collect();

        assert!(sources.rulings.is_some());
        assert!(sources.oracle_cards.is_some());
        assert!(sources.all_cards.is_none());
        assert_eq!(sources.iter().count(), 2);
        assert_eq!(
            sources.get(BulkDataKind::Rulings).unwrap().download_uri,
            "https://data.example.test/rulings.json"
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("all_cards".parse::<BulkDataKind>(), Ok(BulkDataKind::AllCards));
        assert!("everything".parse::<BulkDataKind>().is_err());
        assert_eq!(info("mystery").known_kind(), None);
    }
}
