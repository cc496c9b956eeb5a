use async_trait::async_trait;
use reqwest::{Request, Response};
use std::sync::Arc;

/// Boxed error returned by transports
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One request/response exchange with the network
///
/// Implementations perform exactly one exchange per call and never inspect
/// the response status; interpreting HTTP-level failures is left to the
/// caller. An `Err` means no response was obtained at all (connection
/// refused, DNS failure, timeout, ...).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one round trip
    async fn round_trip(&self, request: Request) -> Result<Response, BoxError>;
}

#[async_trait]
impl<T> HttpTransport for Arc<T>
where
    T: HttpTransport + ?Sized,
{
    async fn round_trip(&self, request: Request) -> Result<Response, BoxError> {
        (**self).round_trip(request).await
    }
}
