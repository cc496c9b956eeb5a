use crate::domain::ports::BoxError;
use serde::de::DeserializeOwned;

/// Turns the raw bytes of one JSON value into a record
///
/// Bulk readers find element boundaries themselves and delegate the actual
/// decoding here, so they stay agnostic of the record shape.
pub trait RecordDecoder<T> {
    /// Decode one complete JSON value
    fn decode(&self, raw: &[u8]) -> Result<T, BoxError>;
}

/// Decodes any `DeserializeOwned` record with `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonDecoder;

impl<T: DeserializeOwned> RecordDecoder<T> for SerdeJsonDecoder {
    fn decode(&self, raw: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(raw)?)
    }
}
