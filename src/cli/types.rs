//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::models::{BulkDataKind, Order, OrderDirection, UniqueMode};

#[derive(Parser)]
#[command(name = "scryfall")]
#[command(about = "Query the Scryfall card catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to scryfall.yaml and scryfall.local.yaml)
    #[arg(short, long, global = true, env = "SCRYFALL_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Card lookups
    #[command(subcommand)]
    Card(CardCommands),

    /// Show the rulings for a card
    Rulings(RulingsArgs),

    /// Bulk data dumps
    #[command(subcommand)]
    Bulk(BulkCommands),
}

#[derive(Subcommand)]
pub enum CardCommands {
    /// Look up one card by name
    Named {
        /// Card name
        name: String,

        /// Match the name fuzzily instead of exactly
        #[arg(short, long)]
        fuzzy: bool,

        /// Restrict to a set code
        #[arg(short, long)]
        set: Option<String>,
    },

    /// Full-text card search
    Search {
        /// Search query, e.g. "t:sliver c:r"
        query: String,

        /// Sort order
        #[arg(short, long, value_enum)]
        order: Option<OrderArg>,

        /// Sort direction
        #[arg(short, long, value_enum)]
        dir: Option<DirectionArg>,

        /// How results are collapsed
        #[arg(short, long, value_enum)]
        unique: Option<UniqueArg>,

        /// Include tokens and other extras
        #[arg(long)]
        include_extras: bool,

        /// Maximum number of result pages to read
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },

    /// A random card
    Random {
        /// Restrict candidates to a search query
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Card names starting with a prefix
    Autocomplete {
        /// Name prefix
        prefix: String,
    },
}

#[derive(Args)]
pub struct RulingsArgs {
    /// Card identifier; a collector number when --by collector
    pub identifier: String,

    /// Kind of identifier
    #[arg(short, long, value_enum, default_value = "scryfall")]
    pub by: RulingLookup,

    /// Set code, required with --by collector
    #[arg(short, long, required_if_eq("by", "collector"))]
    pub set: Option<String>,
}

#[derive(Subcommand)]
pub enum BulkCommands {
    /// List published bulk dumps
    Sources,

    /// Stream a bulk dump and count its records
    Count {
        /// Dump kind
        #[arg(value_enum)]
        kind: BulkKindArg,

        /// Read a downloaded dump instead of fetching it
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RulingLookup {
    Scryfall,
    Multiverse,
    Mtgo,
    Arena,
    Collector,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Name,
    Set,
    Released,
    Rarity,
    Color,
    Usd,
    Tix,
    Eur,
    Cmc,
    Power,
    Toughness,
    Edhrec,
    Penny,
    Artist,
    Review,
}

impl From<OrderArg> for Order {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Name => Self::Name,
            OrderArg::Set => Self::Set,
            OrderArg::Released => Self::Released,
            OrderArg::Rarity => Self::Rarity,
            OrderArg::Color => Self::Color,
            OrderArg::Usd => Self::Usd,
            OrderArg::Tix => Self::Tix,
            OrderArg::Eur => Self::Eur,
            OrderArg::Cmc => Self::Cmc,
            OrderArg::Power => Self::Power,
            OrderArg::Toughness => Self::Toughness,
            OrderArg::Edhrec => Self::Edhrec,
            OrderArg::Penny => Self::Penny,
            OrderArg::Artist => Self::Artist,
            OrderArg::Review => Self::Review,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Auto,
    Asc,
    Desc,
}

impl From<DirectionArg> for OrderDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Auto => Self::Auto,
            DirectionArg::Asc => Self::Ascending,
            DirectionArg::Desc => Self::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UniqueArg {
    Cards,
    Art,
    Prints,
}

impl From<UniqueArg> for UniqueMode {
    fn from(arg: UniqueArg) -> Self {
        match arg {
            UniqueArg::Cards => Self::Cards,
            UniqueArg::Art => Self::Art,
            UniqueArg::Prints => Self::Prints,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum BulkKindArg {
    OracleCards,
    UniqueArtwork,
    DefaultCards,
    AllCards,
    Rulings,
}

impl From<BulkKindArg> for BulkDataKind {
    fn from(arg: BulkKindArg) -> Self {
        match arg {
            BulkKindArg::OracleCards => Self::OracleCards,
            BulkKindArg::UniqueArtwork => Self::UniqueArtwork,
            BulkKindArg::DefaultCards => Self::DefaultCards,
            BulkKindArg::AllCards => Self::AllCards,
            BulkKindArg::Rulings => Self::Rulings,
        }
    }
}
