use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An official ruling or Scryfall note attached to a card's Oracle identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruling {
    /// Oracle identity the ruling applies to
    pub oracle_id: Uuid,

    /// Who issued the ruling: `wotc` or `scryfall`
    pub source: String,

    /// Publication date
    pub published_at: NaiveDate,

    /// Ruling text
    pub comment: String,
}

impl Ruling {
    /// True if the ruling was issued by Wizards of the Coast
    pub fn is_official(&self) -> bool {
        self.source == "wotc"
    }
}
