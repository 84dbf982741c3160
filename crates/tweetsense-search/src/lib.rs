//! TweetSense Search
//!
//! Fetches raw tweet texts for a search term. The rest of the system only
//! sees [`SearchClient`]: one query in, an ordered list of texts out.

pub mod query;
pub mod twitter;

pub use query::SearchQuery;
pub use twitter::{parse_search_response, Credentials, TwitterSearchClient};

use async_trait::async_trait;
use tweetsense_core::Result;

/// A source of tweet texts
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one search and return the untruncated texts in result order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>>;
}
