//! Scryfall API client
//!
//! A client for the Scryfall card catalog that stays within the API's rate
//! limits and streams multi-gigabyte bulk dumps one record at a time.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): API data types and port traits
//! - **Service Layer** (`services`): Card, ruling and bulk data clients
//! - **Infrastructure Layer** (`infrastructure`): Rate-limited HTTP transport,
//!   streaming bulk decoding, configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use scryfall_client::{Config, NamedCardRequest, ScryfallClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScryfallClient::new(&Config::default())?;
//!     let card = client
//!         .cards()
//!         .named(&NamedCardRequest::fuzzy("fury sliv"))
//!         .await?;
//!     println!("{} ({})", card.name, card.set_name);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ApiError, BulkDataInfo, BulkDataKind, BulkDataSources, Card, CardIdentifier,
    CardSearchOptions, Config, ImageUris, Legality, NamedCardRequest, Order, RandomCardOptions,
    Ruling,
};
pub use domain::ports::{BoxError, HttpTransport};
pub use infrastructure::bulk::{BlockingBulkReader, BulkReadError, BulkReader};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::{
    RequestContext, ReqwestTransport, ResilientTransport, SlidingWindowLimiter, TransportError,
};
pub use services::{ClientError, ScryfallClient};
