//! Twitter v1.1 search client
//!
//! Uses application-only auth: the consumer key/secret pair is exchanged for
//! a bearer token once, on the first search, and reused afterwards.
//!
//! ```text
//! POST {base}/oauth2/token                    grant_type=client_credentials
//! GET  {base}/1.1/search/tweets.json?q=..&lang=..&count=..&tweet_mode=extended
//! ```

use crate::{SearchClient, SearchQuery};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use tweetsense_core::{Error, Result};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";

/// JSON key carrying the untruncated tweet text in extended mode
pub const FULL_TEXT_KEY: &str = "full_text";

/// How the client authenticates
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Consumer key and secret, exchanged for a bearer token on first use
    Consumer { key: String, secret: String },

    /// A ready bearer token
    Bearer(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<serde_json::Value>,
}

/// Search client for the Twitter v1.1 API
pub struct TwitterSearchClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    bearer: OnceCell<String>,
}

impl TwitterSearchClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::search(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials,
            bearer: OnceCell::new(),
        })
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn bearer_token(&self) -> Result<&str> {
        let token = self
            .bearer
            .get_or_try_init(|| async {
                match &self.credentials {
                    Credentials::Bearer(token) => Ok(token.clone()),
                    Credentials::Consumer { key, secret } => self.request_token(key, secret).await,
                }
            })
            .await?;
        Ok(token.as_str())
    }

    async fn request_token(&self, key: &str, secret: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/oauth2/token", self.base_url))
            .basic_auth(key, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::search(format!(
                "Token request returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::search(format!("Malformed token response: {e}")))?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::search(format!(
                "Unexpected token type '{}'",
                token.token_type
            )));
        }

        info!("Obtained application bearer token");
        Ok(token.access_token)
    }
}

#[async_trait]
impl SearchClient for TwitterSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>> {
        let token = self.bearer_token().await?;

        debug!(term = query.term(), lang = query.lang(), count = query.count(), "Searching tweets");
        let response = self
            .client
            .get(format!("{}/1.1/search/tweets.json", self.base_url))
            .bearer_auth(token)
            .query(&query.to_params())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::search(format!("Search returned {status}: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::search(format!("Failed to read search response: {e}")))?;
        let texts = parse_search_response(&body)?;
        info!(term = query.term(), tweets = texts.len(), "Search complete");
        Ok(texts)
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::search(format!("Request failed: {e}"))
    }
}

/// Extract tweet texts, in response order, from a search response body.
///
/// Statuses without a non-blank `full_text` are dropped.
pub fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    let mut texts = Vec::with_capacity(response.statuses.len());
    for (index, status) in response.statuses.iter().enumerate() {
        match status.get(FULL_TEXT_KEY).and_then(|v| v.as_str()) {
            Some(text) if !text.trim().is_empty() => texts.push(text.to_string()),
            _ => warn!(index, "Status without {} dropped", FULL_TEXT_KEY),
        }
    }
    Ok(texts)
}
