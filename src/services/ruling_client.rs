use super::client::ScryfallClient;
use super::errors::ClientError;
use crate::domain::models::{ListResponse, Ruling};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::http::RequestContext;
use reqwest::Method;
use tracing::instrument;
use uuid::Uuid;

/// Client for the per-card rulings endpoints
pub struct RulingClient<'a, T> {
    client: &'a ScryfallClient<T>,
    context: RequestContext,
}

impl<'a, T: HttpTransport> RulingClient<'a, T> {
    pub(crate) fn new(client: &'a ScryfallClient<T>) -> Self {
        Self {
            client,
            context: RequestContext::new(),
        }
    }

    /// Observe `context` for every request made through this handle
    #[must_use]
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Rulings for the card with this Scryfall id
    #[instrument(skip(self))]
    pub async fn by_id(&self, id: Uuid) -> Result<Vec<Ruling>, ClientError> {
        self.fetch(&["cards", &id.to_string(), "rulings"]).await
    }

    /// Rulings for the card with this Gatherer multiverse id
    #[instrument(skip(self))]
    pub async fn by_multiverse_id(&self, id: u64) -> Result<Vec<Ruling>, ClientError> {
        self.fetch(&["cards", "multiverse", &id.to_string(), "rulings"])
            .await
    }

    /// Rulings for the card with this MTGO id
    #[instrument(skip(self))]
    pub async fn by_mtgo_id(&self, id: u64) -> Result<Vec<Ruling>, ClientError> {
        self.fetch(&["cards", "mtgo", &id.to_string(), "rulings"]).await
    }

    /// Rulings for the card with this Arena id
    #[instrument(skip(self))]
    pub async fn by_arena_id(&self, id: u64) -> Result<Vec<Ruling>, ClientError> {
        self.fetch(&["cards", "arena", &id.to_string(), "rulings"]).await
    }

    /// Rulings for the card with this set code and collector number
    #[instrument(skip(self))]
    pub async fn by_collector_number(
        &self,
        set: &str,
        collector_number: &str,
    ) -> Result<Vec<Ruling>, ClientError> {
        if set.is_empty() || collector_number.is_empty() {
            return Err(ClientError::InvalidRequest(
                "set code and collector number are required".to_string(),
            ));
        }
        self.fetch(&["cards", set, collector_number, "rulings"]).await
    }

    async fn fetch(&self, segments: &[&str]) -> Result<Vec<Ruling>, ClientError> {
        let url = self.client.endpoint(segments);
        let list: ListResponse<Ruling> = self
            .client
            .execute(self.client.request(Method::GET, url), &self.context)
            .await?;
        Ok(list.data)
    }
}
