//! Streaming decoding of bulk data dumps
//!
//! Bulk dumps are one JSON array of homogeneous objects. The readers here
//! find element boundaries incrementally and hand each element's bytes to a
//! [`RecordDecoder`], so memory use stays proportional to one record:
//! - [`BulkReader`]: async, over any `tokio::io::AsyncBufRead`
//! - [`BlockingBulkReader`]: blocking, over any `std::io::BufRead`

pub mod blocking;
mod cursor;
pub mod decoder;
pub mod errors;
pub mod reader;
mod scanner;

pub use blocking::BlockingBulkReader;
pub use decoder::{RecordDecoder, SerdeJsonDecoder};
pub use errors::BulkReadError;
pub use reader::BulkReader;
