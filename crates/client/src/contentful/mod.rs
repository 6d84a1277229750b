//! Contentful Content Delivery API client.
//!
//! ### Protocol
//!
//! - **Endpoint**: `{base}/spaces/{space}/environments/{env}/{entries|content_types}`
//! - **Authentication**: `Authorization: Bearer <access token>`.
//! - **Credentials**: `CONTENTFUL_SPACE_ID` and `CONTENTFUL_ACCESS_TOKEN`; both required.
//! - **Links**: resolved client-side from `includes`, see [`response`].

pub mod error;
pub mod query;
pub mod response;

pub use error::ContentfulError;
pub use query::EntryQuery;
pub use response::{ContentTypeCollection, EntryCollection};

use crate::content::{ContentSource, EntryPage};
use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use techlens_core::AppConfig;

/// Default Delivery API base URL.
const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "techlens/0.1";

/// Contentful client configuration.
#[derive(Debug, Clone)]
pub struct ContentfulConfig {
    pub space_id: String,
    pub access_token: String,
    /// Environment alias (default: master).
    pub environment: String,
    /// Base URL (default: https://cdn.contentful.com).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ContentfulConfig {
    fn default() -> Self {
        Self {
            space_id: String::new(),
            access_token: String::new(),
            environment: "master".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ContentfulConfig {
    /// Build client configuration from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ContentfulError> {
        let (space_id, access_token) = config.require_contentful().map_err(|_| {
            if config.contentful_space_id.as_deref().is_none_or(|v| v.trim().is_empty()) {
                ContentfulError::MissingCredentials("CONTENTFUL_SPACE_ID")
            } else {
                ContentfulError::MissingCredentials("CONTENTFUL_ACCESS_TOKEN")
            }
        })?;

        Ok(Self {
            space_id: space_id.to_string(),
            access_token: access_token.to_string(),
            environment: config.contentful_environment.clone(),
            base_url: config.contentful_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Contentful Delivery API client.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    http: reqwest::Client,
    config: ContentfulConfig,
}

impl ContentfulClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ContentfulConfig) -> Result<Self, ContentfulError> {
        if config.space_id.is_empty() {
            return Err(ContentfulError::MissingCredentials("CONTENTFUL_SPACE_ID"));
        }
        if config.access_token.is_empty() {
            return Err(ContentfulError::MissingCredentials("CONTENTFUL_ACCESS_TOKEN"));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ContentfulError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Create a new client from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ContentfulError> {
        Self::new(ContentfulConfig::from_app_config(config)?)
    }

    pub fn config(&self) -> &ContentfulConfig {
        &self.config
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/spaces/{}/environments/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.space_id,
            self.config.environment,
            resource
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self, resource: &str, params: &[(String, String)],
    ) -> Result<T, ContentfulError> {
        let start = Instant::now();
        let url = self.endpoint(resource);

        let http_response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(resource, status = status.as_u16(), "Contentful response");

        if status == 401 || status == 403 {
            return Err(ContentfulError::AuthError);
        }

        if status == 404 {
            return Err(ContentfulError::NotFound(format!(
                "space {} / environment {}",
                self.config.space_id, self.config.environment
            )));
        }

        if status == 429 {
            return Err(ContentfulError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ContentfulError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let parsed = serde_json::from_slice(&bytes).map_err(|e| ContentfulError::Parse(e.to_string()))?;

        tracing::debug!(resource, elapsed = ?start.elapsed(), bytes = bytes.len(), "Contentful request completed");

        Ok(parsed)
    }
}

#[async_trait]
impl ContentSource for ContentfulClient {
    async fn content_types(&self) -> Result<Vec<String>, ContentfulError> {
        let params = [("limit".to_string(), "1000".to_string())];
        let collection: ContentTypeCollection = self.get_json("content_types", &params).await?;
        collection.into_ids()
    }

    async fn entry_page(&self, query: &EntryQuery) -> Result<EntryPage, ContentfulError> {
        query.validate()?;

        let collection: EntryCollection = self.get_json("entries", &query.to_params()).await?;
        let reported_total = collection.total;
        let items = collection.resolve(query.include)?;
        let total = reported_total.unwrap_or(items.len() as u64);

        tracing::debug!(content_type = %query.content_type, total, returned = items.len(), "entries fetched");

        Ok(EntryPage { items, total })
    }
}
