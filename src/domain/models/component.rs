use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship of a related card part, such as a token or meld half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// A token created by the card
    Token,
    /// A piece of a known combo
    ComboPiece,
    /// One half of a meld pair
    MeldPart,
    /// The melded result
    MeldResult,
}

impl Component {
    /// Every known component
    pub const ALL: [Self; 4] = [
        Self::Token,
        Self::ComboPiece,
        Self::MeldPart,
        Self::MeldResult,
    ];

    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::ComboPiece => "combo_piece",
            Self::MeldPart => "meld_part",
            Self::MeldResult => "meld_result",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for component in Component::ALL {
            let json = serde_json::to_string(&component).unwrap();
            assert_eq!(json, format!("\"{component}\""));
            assert_eq!(serde_json::from_str::<Component>(&json).unwrap(), component);
        }
    }

    #[test]
    fn test_unknown_component_is_rejected() {
        assert!(serde_json::from_str::<Component>("\"partner\"").is_err());
    }
}
