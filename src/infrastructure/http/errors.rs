use crate::domain::ports::BoxError;
use thiserror::Error;

/// Errors returned by [`ResilientTransport`](super::ResilientTransport)
///
/// These describe failures to obtain a response at all. A response with a
/// non-success status is not an error at this layer.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying network exchange failed
    #[error("round trip failed: {0}")]
    RoundTrip(#[source] BoxError),

    /// Every attempt in the retry budget was rejected by the rate limiter
    #[error("timed out while waiting for available request in rate limiter after {attempts} attempts")]
    LimiterTimeout {
        /// Loop iterations spent before giving up
        attempts: u32,
    },

    /// The request context was cancelled
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline passed
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl TransportError {
    /// Returns true if the underlying network exchange failed
    pub const fn is_round_trip(&self) -> bool {
        matches!(self, Self::RoundTrip(_))
    }

    /// Returns true if the rate limiter never admitted the request
    pub const fn is_limiter_timeout(&self) -> bool {
        matches!(self, Self::LimiterTimeout { .. })
    }

    /// Returns true if retrying at a higher level may succeed
    ///
    /// Cancellation and deadline expiry were requested by the caller and are
    /// never transient.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RoundTrip(_) | Self::LimiterTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_round_trip_keeps_source() {
        let inner = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let error = TransportError::RoundTrip(Box::new(inner));

        assert!(error.is_round_trip());
        assert!(!error.is_limiter_timeout());
        assert_eq!(error.to_string(), "round trip failed: connection refused");

        let source = error.source().unwrap();
        let io_error = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_error.kind(), io::ErrorKind::ConnectionRefused);
    }

    #[test]
    fn test_limiter_timeout_display() {
        let error = TransportError::LimiterTimeout { attempts: 5 };

        assert!(error.is_limiter_timeout());
        assert!(error.is_transient());
        assert_eq!(
            error.to_string(),
            "timed out while waiting for available request in rate limiter after 5 attempts"
        );
    }

    #[test]
    fn test_caller_initiated_errors_are_not_transient() {
        assert!(!TransportError::Cancelled.is_transient());
        assert!(!TransportError::DeadlineExceeded.is_transient());
    }
}
