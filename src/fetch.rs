//! Fetch the raw digest from the news proxy.
//!
//! One `POST` per call, no retries, no caching. Timeouts and cancellation
//! belong to whoever builds the [`reqwest::Client`]; see
//! [`NewsClient::with_client`].

use crate::error::NewsError;
use crate::models::{NewsItem, NewsResponse};
use crate::parse::parse_daily_news;
use crate::token_store::{read_token, TokenStore, UnavailableStore};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Path of the news proxy on the application server.
pub const NEWS_PROXY_ENDPOINT: &str = "/api/v1/utils/news";

/// Key under which the bearer token is kept in the credential store.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Serialize)]
struct NewsRequest<'a> {
    employee_name: &'a str,
}

/// Client for the news proxy.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: Option<Url>,
    token_store: Arc<dyn TokenStore>,
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl NewsClient {
    /// Build a client with a cookie store so session cookies travel with
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: Option<Url>, token_store: Arc<dyn TokenStore>) -> Result<Self, NewsError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(NewsError::Request)?;
        Ok(Self::with_client(client, base_url, token_store))
    }

    /// Build a client around a caller-supplied [`reqwest::Client`].
    pub fn with_client(
        client: Client,
        base_url: Option<Url>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url,
            token_store,
        }
    }

    /// A client that sends no credential.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Request`] if the HTTP client cannot be built.
    pub fn anonymous(base_url: Option<Url>) -> Result<Self, NewsError> {
        Self::new(base_url, Arc::new(UnavailableStore))
    }

    /// Resolve `endpoint` to an absolute URL.
    ///
    /// Absolute URLs are used as-is; anything else is joined onto the base URL.
    pub fn resolve_endpoint(&self, endpoint: &str) -> Result<Url, NewsError> {
        resolve_endpoint(self.base_url.as_ref(), endpoint)
    }

    /// `POST` the employee name to `endpoint` and return the decoded body.
    ///
    /// The body is returned without any structural checks; see
    /// [`parse_daily_news`] for those.
    ///
    /// # Errors
    ///
    /// - [`NewsError::InvalidEndpoint`] if `endpoint` cannot be resolved
    /// - [`NewsError::Request`] if no response was received
    /// - [`NewsError::FetchFailed`] on a non-success status (the body is not read)
    /// - [`NewsError::Decode`] if a success body is not JSON
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_daily_news(
        &self,
        employee_name: &str,
        endpoint: &str,
    ) -> Result<NewsResponse, NewsError> {
        let url = self.resolve_endpoint(endpoint)?;
        let token = read_token(self.token_store.as_ref(), TOKEN_KEY);
        debug!(%url, has_token = token.is_some(), "Requesting daily news");

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&NewsRequest { employee_name });
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(NewsError::Request)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "News proxy returned error status");
            return Err(NewsError::FetchFailed);
        }

        let payload = response
            .json::<NewsResponse>()
            .await
            .map_err(NewsError::Decode)?;
        info!(%status, "Fetched daily news payload");
        Ok(payload)
    }

    /// Fetch and parse in one step.
    ///
    /// `endpoint` defaults to [`NEWS_PROXY_ENDPOINT`]. The first error from
    /// either step is returned unchanged.
    #[instrument(level = "info", skip(self))]
    pub async fn get_daily_news_items(
        &self,
        employee_name: &str,
        endpoint: Option<&str>,
    ) -> Result<Vec<NewsItem>, NewsError> {
        let target = endpoint.unwrap_or(NEWS_PROXY_ENDPOINT);
        let news = self.fetch_daily_news(employee_name, target).await?;
        let items = parse_daily_news(&news)?;
        info!(count = items.len(), "Parsed daily news items");
        Ok(items)
    }
}

/// Resolve `endpoint` against an optional base URL.
pub fn resolve_endpoint(base_url: Option<&Url>, endpoint: &str) -> Result<Url, NewsError> {
    match Url::parse(endpoint) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base_url
            .ok_or_else(|| NewsError::InvalidEndpoint(endpoint.to_string()))?
            .join(endpoint)
            .map_err(|e| NewsError::InvalidEndpoint(format!("{endpoint}: {e}"))),
        Err(e) => Err(NewsError::InvalidEndpoint(format!("{endpoint}: {e}"))),
    }
}
