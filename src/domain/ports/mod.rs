//! Port trait definitions
//!
//! Infrastructure adapters implement these traits; the service layer depends
//! only on the traits:
//! - HttpTransport: a single network request/response exchange

pub mod http_transport;

pub use http_transport::{BoxError, HttpTransport};
