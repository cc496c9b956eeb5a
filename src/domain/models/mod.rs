pub mod api_error;
pub mod bulk_data;
pub mod card;
pub mod component;
pub mod config;
pub mod image;
pub mod legality;
pub mod list;
pub mod ruling;
pub mod search;

pub use api_error::ApiError;
pub use bulk_data::{BulkDataInfo, BulkDataKind, BulkDataSources};
pub use card::{Card, CardFace, Prices, RelatedPart, RelatedUris};
pub use component::Component;
pub use config::{ApiConfig, Config, LoggingConfig, RateLimitConfig, RetryConfig};
pub use image::{ImageType, ImageUris, NoImageUris};
pub use legality::{CardLegality, Legality};
pub use list::{Catalog, ListResponse};
pub use ruling::Ruling;
pub use search::{
    CardIdentifier, CardSearchOptions, NameMatch, NamedCardRequest, Order, OrderDirection,
    RandomCardOptions, UniqueMode, MAX_COLLECTION_IDENTIFIERS,
};
