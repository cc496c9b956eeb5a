//! API clients
//!
//! [`ScryfallClient`] owns the rate-limited transport; the per-resource
//! clients borrow it:
//! - [`CardClient`]: names, ids, searches, random cards and collections
//! - [`RulingClient`]: rulings by any card identifier
//! - [`BulkDataClient`]: bulk dump listing and streaming downloads

pub mod bulk_data_client;
pub mod card_client;
pub mod client;
pub mod errors;
pub mod ruling_client;

pub use bulk_data_client::{BulkDataClient, DownloadBody};
pub use card_client::{CardClient, CardSearchPager, Collection};
pub use client::ScryfallClient;
pub use errors::ClientError;
pub use ruling_client::RulingClient;
