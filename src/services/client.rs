use super::bulk_data_client::BulkDataClient;
use super::card_client::CardClient;
use super::errors::ClientError;
use super::ruling_client::RulingClient;
use crate::domain::models::{ApiError, Config};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::http::{
    RequestContext, ReqwestTransport, ResilientTransport, SlidingWindowLimiter,
};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point to the API
///
/// Every request made through the sub-clients shares one
/// [`ResilientTransport`] and so one rate limit.
#[derive(Debug, Clone)]
pub struct ScryfallClient<T = ReqwestTransport> {
    transport: ResilientTransport<T>,
    builder: ReqwestClient,
    base_url: Url,
}

impl ScryfallClient<ReqwestTransport> {
    /// Build a client with a pooled `reqwest` transport
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let inner = ReqwestTransport::from_config(&config.api).map_err(ClientError::Request)?;
        let builder = inner.client().clone();
        Self::assemble(config, inner, builder)
    }
}

impl<T: HttpTransport> ScryfallClient<T> {
    /// Build a client over a custom transport
    pub fn with_transport(config: &Config, inner: T) -> Result<Self, ClientError> {
        Self::assemble(config, inner, ReqwestClient::new())
    }

    fn assemble(config: &Config, inner: T, builder: ReqwestClient) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api.base_url).map_err(|err| {
            ClientError::InvalidRequest(format!("invalid base URL {}: {err}", config.api.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidRequest(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let limiter = Arc::new(SlidingWindowLimiter::new(
            config.rate_limit.window(),
            config.rate_limit.max_per_window,
        ));
        let transport = ResilientTransport::new(inner, limiter)
            .with_max_retries(config.retry.max_retries)
            .with_backoff(config.retry.initial_backoff(), config.retry.max_backoff());

        info!(
            base_url = %base_url,
            max_per_window = config.rate_limit.max_per_window,
            window_ms = config.rate_limit.window_ms,
            max_retries = config.retry.max_retries,
            "Scryfall client ready"
        );

        Ok(Self {
            transport,
            builder,
            base_url,
        })
    }

    /// Card lookups and searches
    pub fn cards(&self) -> CardClient<'_, T> {
        CardClient::new(self)
    }

    /// Ruling lookups
    pub fn rulings(&self) -> RulingClient<'_, T> {
        RulingClient::new(self)
    }

    /// Bulk data listing and downloads
    pub fn bulk_data(&self) -> BulkDataClient<'_, T> {
        BulkDataClient::new(self)
    }

    /// The shared rate-limited transport
    pub const fn transport(&self) -> &ResilientTransport<T> {
        &self.transport
    }

    /// Base URL every endpoint is resolved against
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the endpoint made of `segments`, each percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.builder.request(method, url)
    }

    /// Send `request` and decode a successful body into `R`
    pub(crate) async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &RequestContext,
    ) -> Result<R, ClientError> {
        let response = self.send(request, context).await?;
        let body = response.bytes().await.map_err(ClientError::Body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send `request`, turning non-success statuses into errors
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        context: &RequestContext,
    ) -> Result<Response, ClientError> {
        let request = request.build().map_err(ClientError::Request)?;
        let response = self.transport.send_with_context(request, context).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.map_err(ClientError::Body)?;
        let error = decode_api_error(status, &body);
        warn!(status = error.status, code = %error.code, details = %error.details, "API error");

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ClientError::NoBackFace);
        }
        Err(ClientError::Api(error))
    }
}

/// Error object from a failed response, synthesized when the body is not one
fn decode_api_error(status: StatusCode, body: &[u8]) -> ApiError {
    let mut error = serde_json::from_slice::<ApiError>(body).unwrap_or_else(|_| ApiError {
        code: status
            .canonical_reason()
            .unwrap_or("http_error")
            .to_lowercase()
            .replace(' ', "_"),
        details: String::from_utf8_lossy(body).into_owned(),
        ..ApiError::default()
    });
    error.status = status.as_u16();
    error
}
