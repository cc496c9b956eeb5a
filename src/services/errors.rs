use crate::domain::models::ApiError;
use crate::infrastructure::bulk::BulkReadError;
use crate::infrastructure::http::TransportError;
use thiserror::Error;

/// Errors returned by the API clients
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was obtained
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with an error object
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A card face or image was requested for a card without a back face
    #[error("card has no back face")]
    NoBackFace,

    /// The request was rejected before being sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be built or the request could not be assembled
    #[error("failed to build request: {0}")]
    Request(#[source] reqwest::Error),

    /// Reading the response body failed
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Opening a bulk download failed
    #[error(transparent)]
    Bulk(#[from] BulkReadError),
}

impl ClientError {
    /// Returns true when the API reported that nothing matched
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_not_found())
    }

    /// Returns true if retrying the call later may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_transient(),
            Self::Api(err) => err.status == 429 || err.status >= 500,
            _ => false,
        }
    }
}
