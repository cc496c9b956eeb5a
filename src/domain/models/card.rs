//! Card domain model

use super::component::Component;
use super::image::{ImageUris, NoImageUris};
use super::legality::CardLegality;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single card printing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier of this printing
    pub id: Uuid,

    /// Identifier shared by every printing with the same Oracle text;
    /// absent on reversible cards, where it lives on each face
    #[serde(default)]
    pub oracle_id: Option<Uuid>,

    /// Full name; multi-face cards join face names with `//`
    pub name: String,

    /// Language code of this printing
    #[serde(default, rename = "lang")]
    pub language: String,

    /// Date this printing was first released
    pub released_at: NaiveDate,

    /// API URI of this card object
    #[serde(default)]
    pub uri: String,

    /// Human-facing page on Scryfall
    #[serde(default)]
    pub scryfall_uri: String,

    /// Card layout such as `normal`, `split` or `transform`
    #[serde(default)]
    pub layout: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub mana_cost: Option<String>,

    /// Mana value
    #[serde(default)]
    pub cmc: f32,

    #[serde(default)]
    #[allow(missing_docs)]
    pub type_line: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub oracle_text: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub power: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub toughness: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub loyalty: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub colors: Vec<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub color_identity: Vec<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub keywords: Vec<String>,

    /// Legality in every play format
    #[serde(default, rename = "legalities")]
    pub legality: CardLegality,

    /// Games this printing exists in (`paper`, `mtgo`, `arena`)
    #[serde(default)]
    pub games: Vec<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub finishes: Vec<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub reserved: bool,

    #[serde(default)]
    #[allow(missing_docs)]
    pub promo: bool,

    #[serde(default)]
    #[allow(missing_docs)]
    pub reprint: bool,

    #[serde(default)]
    #[allow(missing_docs)]
    pub digital: bool,

    /// Set code, e.g. `tsp`
    #[serde(default, rename = "set")]
    pub set_code: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub set_name: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub set_type: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub collector_number: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub rarity: String,

    #[serde(default)]
    #[allow(missing_docs)]
    pub flavor_text: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub artist: Option<String>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub multiverse_ids: Vec<u64>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub mtgo_id: Option<u64>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub arena_id: Option<u64>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub tcgplayer_id: Option<u64>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub edhrec_rank: Option<u64>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub penny_rank: Option<u64>,

    /// API URI listing this card's rulings
    #[serde(default)]
    pub rulings_uri: String,

    /// Image renditions; absent on multi-face cards with per-face art
    #[serde(default)]
    pub image_uris: Option<ImageUris>,

    /// Faces of multi-face cards
    #[serde(default)]
    pub card_faces: Vec<CardFace>,

    #[serde(default)]
    #[allow(missing_docs)]
    pub prices: Prices,

    #[serde(default)]
    #[allow(missing_docs)]
    pub related_uris: RelatedUris,

    /// Related tokens, meld parts and combo pieces
    #[serde(default)]
    pub all_parts: Vec<RelatedPart>,
}

impl Card {
    /// Image renditions of the card, falling back to its first face
    pub fn images(&self) -> Result<&ImageUris, NoImageUris> {
        self.image_uris
            .as_ref()
            .or_else(|| self.card_faces.iter().find_map(|face| face.image_uris.as_ref()))
            .ok_or(NoImageUris)
    }

    /// True if the card has more than one face
    pub fn is_multi_face(&self) -> bool {
        self.card_faces.len() > 1
    }

    /// Related parts with the given relationship
    pub fn parts(&self, component: Component) -> impl Iterator<Item = &RelatedPart> {
        self.all_parts
            .iter()
            .filter(move |part| part.component == component)
    }
}

/// One face of a multi-face card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct CardFace {
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub oracle_id: Option<Uuid>,
    pub image_uris: Option<ImageUris>,
}

/// A card related to another through a [`Component`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RelatedPart {
    pub id: Uuid,
    pub component: Component,
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub uri: String,
}

/// Market prices as decimal strings; `None` when unknown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Prices {
    pub usd: Option<String>,
    pub usd_foil: Option<String>,
    pub usd_etched: Option<String>,
    pub eur: Option<String>,
    pub eur_foil: Option<String>,
    pub tix: Option<String>,
}

/// Links to third-party resources about a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RelatedUris {
    pub gatherer: Option<String>,
    pub tcgplayer_infinite_articles: Option<String>,
    pub tcgplayer_infinite_decks: Option<String>,
    pub edhrec: Option<String>,
}
