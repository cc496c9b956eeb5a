//! HTTP transport infrastructure
//!
//! Every outbound request flows through [`ResilientTransport`], which gates it
//! on a shared [`SlidingWindowLimiter`] before handing it to the wrapped
//! [`HttpTransport`](crate::domain::ports::HttpTransport).

pub mod errors;
pub mod rate_limiter;
pub mod reqwest_transport;
pub mod transport;

pub use errors::TransportError;
pub use rate_limiter::SlidingWindowLimiter;
pub use reqwest_transport::ReqwestTransport;
pub use transport::{
    RequestContext, ResilientTransport, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF,
    DEFAULT_MAX_RETRIES,
};
