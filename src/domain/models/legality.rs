use serde::{Deserialize, Serialize};
use std::fmt;

/// Legality of a card in one play format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    /// Allowed in the format
    Legal,
    /// Not allowed in the format
    #[default]
    NotLegal,
    /// Allowed, limited to one copy
    Restricted,
    /// Explicitly banned
    Banned,
}

impl Legality {
    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::NotLegal => "not_legal",
            Self::Restricted => "restricted",
            Self::Banned => "banned",
        }
    }

    /// True if at least one copy may be played
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Legal | Self::Restricted)
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legality of a card across every supported format
///
/// Formats missing from a payload read as [`Legality::NotLegal`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CardLegality {
    pub standard: Legality,
    pub future: Legality,
    pub historic: Legality,
    pub gladiator: Legality,
    pub pioneer: Legality,
    pub explorer: Legality,
    pub modern: Legality,
    pub legacy: Legality,
    pub pauper: Legality,
    pub vintage: Legality,
    pub penny: Legality,
    pub commander: Legality,
    pub oathbreaker: Legality,
    pub brawl: Legality,
    #[serde(rename = "historicbrawl")]
    pub historic_brawl: Legality,
    #[serde(rename = "standardbrawl")]
    pub standard_brawl: Legality,
    pub timeless: Legality,
    pub alchemy: Legality,
    #[serde(rename = "paupercommander")]
    pub pauper_commander: Legality,
    pub duel: Legality,
    #[serde(rename = "oldschool")]
    pub old_school: Legality,
    #[serde(rename = "premodern")]
    pub pre_modern: Legality,
    pub predh: Legality,
}

impl CardLegality {
    /// Format names paired with their legality, in wire order
    pub fn formats(&self) -> [(&'static str, Legality); 23] {
        [
            ("standard", self.standard),
            ("future", self.future),
            ("historic", self.historic),
            ("timeless", self.timeless),
            ("gladiator", self.gladiator),
            ("pioneer", self.pioneer),
            ("explorer", self.explorer),
            ("modern", self.modern),
            ("legacy", self.legacy),
            ("pauper", self.pauper),
            ("vintage", self.vintage),
            ("penny", self.penny),
            ("commander", self.commander),
            ("oathbreaker", self.oathbreaker),
            ("standardbrawl", self.standard_brawl),
            ("brawl", self.brawl),
            ("historicbrawl", self.historic_brawl),
            ("alchemy", self.alchemy),
            ("paupercommander", self.pauper_commander),
            ("duel", self.duel),
            ("oldschool", self.old_school),
            ("premodern", self.pre_modern),
            ("predh", self.predh),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legality_from_json() {
        let legal: Legality = serde_json::from_str("\"legal\"").unwrap();
        assert_eq!(legal, Legality::Legal);

        let not_legal: Legality = serde_json::from_str("\"not_legal\"").unwrap();
        assert_eq!(not_legal, Legality::NotLegal);
    }

    #[test]
    fn test_unknown_legality_is_rejected() {
        assert!(serde_json::from_str::<Legality>("\"unknown\"").is_err());
        assert!(serde_json::from_str::<Legality>("invalid").is_err());
    }

    #[test]
    fn test_missing_formats_default_to_not_legal() {
        let legality: CardLegality =
            serde_json::from_str(r#"{"modern":"legal","paupercommander":"restricted"}"#).unwrap();

        assert_eq!(legality.modern, Legality::Legal);
        assert_eq!(legality.pauper_commander, Legality::Restricted);
        assert_eq!(legality.standard, Legality::NotLegal);
        assert_eq!(legality.timeless, Legality::NotLegal);
    }

    #[test]
    fn test_unknown_legality_in_card_legality_is_rejected() {
        let result = serde_json::from_str::<CardLegality>(r#"{"modern":"sometimes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_formats_listing() {
        let legality = CardLegality {
            predh: Legality::Banned,
            ..CardLegality::default()
        };

        let formats = legality.formats();
        assert_eq!(formats[0], ("standard", Legality::NotLegal));
        assert!(formats.contains(&("predh", Legality::Banned)));
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(Legality::NotLegal.to_string(), "not_legal");
        assert!(Legality::Restricted.is_playable());
        assert!(!Legality::Banned.is_playable());
    }
}
