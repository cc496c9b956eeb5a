//! Rate-limited request dispatch
//!
//! [`ResilientTransport`] is the single choke point for outbound requests.
//! Every call first asks the shared [`SlidingWindowLimiter`] for admission and
//! waits with doubling backoff while throttled. Rate-limit waits and the real
//! network attempt share one bounded budget; network failures are reported
//! immediately and never retried here.

use super::errors::TransportError;
use super::rate_limiter::SlidingWindowLimiter;
use super::reqwest_transport::ReqwestTransport;
use crate::domain::ports::{BoxError, HttpTransport};
use async_trait::async_trait;
use reqwest::{Request, Response};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Default number of loop iterations per request
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default wait after the first rate-limit rejection
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Default ceiling for the doubling backoff
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Cancellation and deadline signals for one request
///
/// Both are observed while waiting out rate-limit backoff and while the
/// network exchange is in flight.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context that is never cancelled and has no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `token`; cancelling it aborts the request
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Abort the request once `deadline` passes
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the request once `timeout` has elapsed from now
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The cancellation token observed by this context
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// The deadline, if any
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context has already fired
    fn check(&self) -> Result<(), TransportError> {
        if self.cancellation.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(TransportError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Run `future` unless the context is cancelled or expires first
    async fn guard<F: Future>(&self, future: F) -> Result<F::Output, TransportError> {
        let expiry = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancellation.cancelled() => Err(TransportError::Cancelled),
            () = expiry => Err(TransportError::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}

/// Attempt counter and backoff for one `send` call
#[derive(Debug, Clone, Copy)]
struct RetryState {
    attempts: u32,
    backoff: Duration,
}

impl RetryState {
    const fn new(initial_backoff: Duration) -> Self {
        Self {
            attempts: 0,
            backoff: initial_backoff,
        }
    }

    fn double_backoff(&mut self, ceiling: Duration) {
        self.backoff = self.backoff.saturating_mul(2).min(ceiling);
    }
}

/// Rate-limited wrapper around an [`HttpTransport`]
///
/// Clones share the same limiter and so one request budget.
#[derive(Debug, Clone)]
pub struct ResilientTransport<T = ReqwestTransport> {
    inner: T,
    limiter: Arc<SlidingWindowLimiter>,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl<T: HttpTransport> ResilientTransport<T> {
    /// Wrap `inner`, gating every request through `limiter`
    ///
    /// Uses [`DEFAULT_MAX_RETRIES`], [`DEFAULT_INITIAL_BACKOFF`] and
    /// [`DEFAULT_MAX_BACKOFF`].
    pub fn new(inner: T, limiter: Arc<SlidingWindowLimiter>) -> Self {
        Self {
            inner,
            limiter,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }

    /// Set the loop budget shared by rate-limit waits and the network attempt
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the first backoff and the ceiling it doubles towards
    #[must_use]
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// The shared limiter
    pub const fn limiter(&self) -> &Arc<SlidingWindowLimiter> {
        &self.limiter
    }

    /// The wrapped transport
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// Loop budget per request
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Send `request` with no cancellation or deadline
    pub async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.send_with_context(request, &RequestContext::new()).await
    }

    /// Send `request`, observing `context` while waiting and while in flight
    ///
    /// # Returns
    /// * `Ok(Response)` - the raw response, whatever its status
    /// * `Err(TransportError::RoundTrip)` - the network exchange failed
    /// * `Err(TransportError::LimiterTimeout)` - never admitted within budget
    /// * `Err(TransportError::Cancelled | DeadlineExceeded)` - context fired
    #[instrument(
        skip(self, request, context),
        fields(method = %request.method(), url = %request.url())
    )]
    pub async fn send_with_context(
        &self,
        request: Request,
        context: &RequestContext,
    ) -> Result<Response, TransportError> {
        let mut state = RetryState::new(self.initial_backoff);

        while state.attempts < self.max_retries {
            state.attempts += 1;

            // A fired context must not spend an admission
            context.check()?;
            if !self.limiter.try_admit() {
                if state.attempts >= self.max_retries {
                    break;
                }

                debug!(
                    attempt = state.attempts,
                    backoff = ?state.backoff,
                    "Rate limited, backing off"
                );
                context.guard(sleep(state.backoff)).await?;
                state.double_backoff(self.max_backoff);
                continue;
            }

            debug!(attempt = state.attempts, "Dispatching request");
            return context
                .guard(self.inner.round_trip(request))
                .await?
                .map_err(|err| {
                    warn!(error = %err, "Round trip failed");
                    TransportError::RoundTrip(err)
                });
        }

        warn!(
            attempts = state.attempts,
            "Rate limiter never admitted the request"
        );
        Err(TransportError::LimiterTimeout {
            attempts: state.attempts,
        })
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for ResilientTransport<T> {
    async fn round_trip(&self, request: Request) -> Result<Response, BoxError> {
        self.send(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingTransport {
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingTransport {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CountingTransport {
        async fn round_trip(&self, _request: Request) -> Result<Response, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Box::new(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }
            let response = http::Response::builder()
                .status(503)
                .body(String::new())
                .unwrap();
            Ok(Response::from(response))
        }
    }

    fn request() -> Request {
        reqwest::Client::new()
            .get("https://api.scryfall.com/cards/random")
            .build()
            .unwrap()
    }

    fn transport(fail: bool, capacity: usize) -> ResilientTransport<CountingTransport> {
        let limiter = Arc::new(SlidingWindowLimiter::new(Duration::from_secs(1), capacity));
        ResilientTransport::new(CountingTransport::new(fail), limiter)
    }

    #[test]
    fn test_retry_state_doubles_up_to_ceiling() {
        let mut state = RetryState::new(Duration::from_secs(1));
        let ceiling = Duration::from_secs(5);

        state.double_backoff(ceiling);
        assert_eq!(state.backoff, Duration::from_secs(2));
        state.double_backoff(ceiling);
        assert_eq!(state.backoff, Duration::from_secs(4));
        state.double_backoff(ceiling);
        assert_eq!(state.backoff, ceiling);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_is_not_inspected() {
        let transport = transport(false, 1);

        let response = transport.send(request()).await.unwrap();

        assert_eq!(response.status(), 503);
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_is_not_retried() {
        let transport = transport(true, 10);

        let err = transport.send(request()).await.unwrap_err();

        assert!(err.is_round_trip());
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_timeout_uses_whole_budget() {
        let transport = transport(false, 0);
        let start = Instant::now();

        let err = transport.send(request()).await.unwrap_err();

        assert!(matches!(err, TransportError::LimiterTimeout { attempts: 5 }));
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 0);
        // 1 + 2 + 4 + 8 seconds; no sleep after the final rejection
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_respects_ceiling() {
        let transport = transport(false, 0)
            .with_backoff(Duration::from_millis(100), Duration::from_millis(250));
        let start = Instant::now();

        let _ = transport.send(request()).await;

        // 100 + 200 + 250 + 250 milliseconds
        assert_eq!(start.elapsed(), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_budget_times_out_immediately() {
        let transport = transport(false, 10).with_max_retries(0);

        let err = transport.send(request()).await.unwrap_err();

        assert!(matches!(err, TransportError::LimiterTimeout { attempts: 0 }));
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_backoff() {
        let transport = transport(false, 0);
        let token = CancellationToken::new();
        let context = RequestContext::new().with_cancellation(token.clone());

        tokio::spawn(async move {
            sleep(Duration::from_millis(1500)).await;
            token.cancel();
        });

        let start = Instant::now();
        let err = transport
            .send_with_context(request(), &context)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_context_spends_no_admission() {
        let transport = transport(false, 3);
        let token = CancellationToken::new();
        token.cancel();
        let context = RequestContext::new().with_cancellation(token);

        let err = transport
            .send_with_context(request(), &context)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Cancelled));
        assert_eq!(transport.limiter().available(), 3);
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_spends_no_admission() {
        let transport = transport(false, 3);
        let context = RequestContext::new().with_deadline(Instant::now());

        let err = transport
            .send_with_context(request(), &context)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::DeadlineExceeded));
        assert_eq!(transport.limiter().available(), 3);
        assert_eq!(transport.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_backoff() {
        let transport = transport(false, 0);
        let context = RequestContext::new().with_timeout(Duration::from_millis(2500));

        let err = transport
            .send_with_context(request(), &context)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acts_as_http_transport() {
        let transport: Arc<dyn HttpTransport> = Arc::new(transport(true, 1));

        let err = transport.round_trip(request()).await.unwrap_err();

        let err = err.downcast::<TransportError>().unwrap();
        assert!(err.is_round_trip());
    }
}
