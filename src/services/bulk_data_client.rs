//! Bulk data listing and streaming downloads

use super::client::ScryfallClient;
use super::errors::ClientError;
use crate::domain::models::{BulkDataInfo, BulkDataSources, ListResponse};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::bulk::BulkReader;
use crate::infrastructure::http::RequestContext;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::io;
use tokio_util::io::StreamReader;
use tracing::{info, instrument};

/// Async reader over a download body as it arrives from the network
pub type DownloadBody = StreamReader<BoxStream<'static, io::Result<Bytes>>, Bytes>;

/// Client for the `/bulk-data` endpoints
pub struct BulkDataClient<'a, T> {
    client: &'a ScryfallClient<T>,
    context: RequestContext,
}

impl<'a, T: HttpTransport> BulkDataClient<'a, T> {
    pub(crate) fn new(client: &'a ScryfallClient<T>) -> Self {
        Self {
            client,
            context: RequestContext::new(),
        }
    }

    /// Observe `context` while requests are being sent
    ///
    /// The context does not bound how long a download body takes to read.
    #[must_use]
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Every published bulk dump
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<BulkDataInfo>, ClientError> {
        let url = self.client.endpoint(&["bulk-data"]);
        let list: ListResponse<BulkDataInfo> = self
            .client
            .execute(self.client.request(Method::GET, url), &self.context)
            .await?;
        Ok(list.data)
    }

    /// Published bulk dumps grouped by kind
    pub async fn list_sources(&self) -> Result<BulkDataSources, ClientError> {
        Ok(self.list().await?.into_iter().collect())
    }

    /// Start downloading `source` and decode its records as they arrive
    ///
    /// The download request goes through the shared rate limiter. Only one
    /// record is held in memory at a time, whatever the dump's size.
    #[instrument(skip(self, source), fields(kind = %source.kind, size = source.size))]
    pub async fn open<Record>(
        &self,
        source: &BulkDataInfo,
    ) -> Result<BulkReader<Record, DownloadBody>, ClientError>
    where
        Record: DeserializeOwned,
    {
        let url = Url::parse(&source.download_uri).map_err(|err| {
            ClientError::InvalidRequest(format!(
                "invalid download URI {}: {err}",
                source.download_uri
            ))
        })?;

        let response = self
            .client
            .send(self.client.request(Method::GET, url), &self.context)
            .await?;
        info!(status = %response.status(), "Bulk download started");

        let body = response.bytes_stream().map_err(io::Error::other).boxed();
        Ok(BulkReader::new(StreamReader::new(body)).await?)
    }
}
