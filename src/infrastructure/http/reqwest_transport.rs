use crate::domain::models::ApiConfig;
use crate::domain::ports::{BoxError, HttpTransport};
use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Request, Response};
use tracing::{debug, info};

/// Production transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Wrap an existing client
    pub const fn new(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Build a client with the API's required headers and timeout
    ///
    /// The API rejects requests without a `User-Agent` and an explicit
    /// `Accept` header.
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        info!(
            "Initializing HTTP transport: base_url={}, timeout={}s, user_agent={}",
            config.base_url, config.timeout_secs, config.user_agent
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = ReqwestClient::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .build()?;

        Ok(Self::new(client))
    }

    /// The underlying client, used to build requests
    pub const fn client(&self) -> &ReqwestClient {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn round_trip(&self, request: Request) -> Result<Response, BoxError> {
        debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        debug!("Response status: {}", response.status());
        Ok(response)
    }
}
