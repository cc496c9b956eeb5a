use crate::domain::ports::BoxError;
use thiserror::Error;

/// Errors produced while streaming records out of a bulk JSON array
///
/// Every error returned from `next` leaves the reader unusable; later calls
/// return [`BulkReadError::Poisoned`].
#[derive(Error, Debug)]
pub enum BulkReadError {
    /// The input does not start with a JSON array
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// One element could not be decoded into the record type
    #[error("failed to decode record {index}: {source}")]
    Decode {
        /// Zero-based position of the element in the array
        index: usize,
        /// Underlying deserializer failure
        #[source]
        source: BoxError,
    },

    /// Invalid JSON between elements
    #[error("syntax error at byte {position}: {message}")]
    Syntax {
        /// Byte offset into the source
        position: u64,
        /// What was expected and what was found
        message: String,
    },

    /// The source ended before the closing bracket
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof {
        /// Byte offset into the source
        position: u64,
    },

    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An earlier call failed; the stream position is no longer meaningful
    #[error("reader is unusable after an earlier error")]
    Poisoned,
}

impl BulkReadError {
    /// Returns true for failures to decode a single element
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns true if the input was not a JSON array at all
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}
