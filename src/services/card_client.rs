//! Card lookups, searches and collections

use super::client::ScryfallClient;
use super::errors::ClientError;
use crate::domain::models::{
    Card, CardIdentifier, CardSearchOptions, Catalog, ListResponse, NamedCardRequest,
    RandomCardOptions, MAX_COLLECTION_IDENTIFIERS,
};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::http::RequestContext;
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Client for the `/cards` endpoints
pub struct CardClient<'a, T> {
    client: &'a ScryfallClient<T>,
    context: RequestContext,
}

impl<'a, T: HttpTransport> CardClient<'a, T> {
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

    /// Look up a single card by name
    ///
    /// Fails with a 404 [`ApiError`](crate::domain::models::ApiError) when no
    /// card matches, or when a fuzzy name matches several cards.
    #[instrument(skip(self), fields(name = request.name.name()))]
    pub async fn named(&self, request: &NamedCardRequest) -> Result<Card, ClientError> {
        if request.name.name().trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "card name cannot be empty".to_string(),
            ));
        }

        let url = self.client.endpoint(&["cards", "named"]);
        let request = self
            .client
            .request(Method::GET, url)
            .query(&request.query_pairs());
        self.client.execute(request, &self.context).await
    }

    /// Look up a single card by its Scryfall id
    #[instrument(skip(self))]
    pub async fn by_id(&self, id: Uuid) -> Result<Card, ClientError> {
        let url = self.client.endpoint(&["cards", &id.to_string()]);
        self.client
            .execute(self.client.request(Method::GET, url), &self.context)
            .await
    }

    /// Prepare a full-text search; no request is made until the first page is read
    ///
    /// See <https://scryfall.com/docs/syntax> for the query language.
    pub fn search(
        &self,
        query: &str,
        options: &CardSearchOptions,
    ) -> Result<CardSearchPager<'a, T>, ClientError> {
        if query.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "search query cannot be empty".to_string(),
            ));
        }

        let mut url = self.client.endpoint(&["cards", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            for (key, value) in options.query_pairs() {
                pairs.append_pair(key, value);
            }
        }

        Ok(CardSearchPager {
            client: self.client,
            context: self.context.clone(),
            next_page: Some(url),
            total_cards: None,
            pages_read: 0,
        })
    }

    /// Up to 20 card names starting with `prefix`
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, ClientError> {
        let url = self.client.endpoint(&["cards", "autocomplete"]);
        let request = self
            .client
            .request(Method::GET, url)
            .query(&[("q", prefix)]);
        let catalog: Catalog = self.client.execute(request, &self.context).await?;
        Ok(catalog.data)
    }

    /// A random card, optionally restricted by a search query
    #[instrument(skip(self))]
    pub async fn random(&self, options: &RandomCardOptions) -> Result<Card, ClientError> {
        let url = self.client.endpoint(&["cards", "random"]);
        let request = self
            .client
            .request(Method::GET, url)
            .query(&options.query_pairs());
        self.client.execute(request, &self.context).await
    }

    /// Fetch up to [`MAX_COLLECTION_IDENTIFIERS`] cards in one request
    #[instrument(skip(self, identifiers), fields(count = identifiers.len()))]
    pub async fn collection(
        &self,
        identifiers: &[CardIdentifier],
    ) -> Result<Collection, ClientError> {
        if identifiers.is_empty() || identifiers.len() > MAX_COLLECTION_IDENTIFIERS {
            return Err(ClientError::InvalidRequest(format!(
                "collection needs between 1 and {MAX_COLLECTION_IDENTIFIERS} identifiers, got {}",
                identifiers.len()
            )));
        }

        let url = self.client.endpoint(&["cards", "collection"]);
        let request = self
            .client
            .request(Method::POST, url)
            .json(&CollectionRequest { identifiers });
        self.client.execute(request, &self.context).await
    }
}

#[derive(Serialize)]
struct CollectionRequest<'a> {
    identifiers: &'a [CardIdentifier],
}

/// Result of a collection lookup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Collection {
    /// Cards found, in request order
    pub data: Vec<Card>,

    /// Identifiers that matched nothing
    #[serde(default)]
    pub not_found: Vec<CardIdentifier>,
}

/// Reads the pages of a card search one request at a time
pub struct CardSearchPager<'a, T> {
    client: &'a ScryfallClient<T>,
    context: RequestContext,
    next_page: Option<Url>,
    total_cards: Option<u64>,
    pages_read: usize,
}

impl<T: HttpTransport> CardSearchPager<'_, T> {
    /// True until the last page has been read
    pub const fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Total matches reported by the first page read
    pub const fn total_cards(&self) -> Option<u64> {
        self.total_cards
    }

    /// Pages read so far
    pub const fn pages_read(&self) -> usize {
        self.pages_read
    }

    /// Fetch the next page; `Ok(None)` once every page has been read
    ///
    /// A failed request leaves the pager where it was, so the same page can
    /// be requested again.
    #[instrument(skip(self), fields(page = self.pages_read + 1))]
    pub async fn next_page(&mut self) -> Result<Option<Vec<Card>>, ClientError> {
        let Some(url) = self.next_page.clone() else {
            return Ok(None);
        };

        let page: ListResponse<Card> = self
            .client
            .execute(self.client.request(Method::GET, url), &self.context)
            .await?;

        let next_page = if page.has_more {
            page.next_page
                .as_deref()
                .map(Url::parse)
                .transpose()
                .map_err(|err| ClientError::InvalidRequest(format!("invalid next_page: {err}")))?
        } else {
            None
        };

        self.pages_read += 1;
        self.total_cards = page.total_cards.or(self.total_cards);
        self.next_page = next_page;

        debug!(
            cards = page.data.len(),
            has_more = self.next_page.is_some(),
            "Read search page"
        );
        Ok(Some(page.data))
    }

    /// Read every remaining page into one vector
    pub async fn collect_all(&mut self) -> Result<Vec<Card>, ClientError> {
        let mut cards = Vec::new();
        while let Some(page) = self.next_page().await? {
            cards.extend(page);
        }
        Ok(cards)
    }
}
