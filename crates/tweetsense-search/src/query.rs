//! Search query parameters

use serde::{Deserialize, Serialize};
use tweetsense_core::{Error, Result};

/// Maximum number of results the search endpoint returns per request
pub const MAX_COUNT: u32 = 100;

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search term, trimmed
    term: String,

    /// Language filter (ISO 639-1)
    lang: String,

    /// Number of results to request
    count: u32,

    /// Request untruncated tweet text
    extended: bool,
}

impl SearchQuery {
    /// Build a query for the last 100 English tweets matching `term`.
    ///
    /// Surrounding whitespace is trimmed; a blank term is rejected.
    pub fn new(term: impl AsRef<str>) -> Result<Self> {
        let term = term.as_ref().trim();
        if term.is_empty() {
            return Err(Error::invalid_query("search term is empty"));
        }

        Ok(Self {
            term: term.to_string(),
            lang: "en".to_string(),
            count: MAX_COUNT,
            extended: true,
        })
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the result count; must be within `1..=100`
    pub fn with_count(mut self, count: u32) -> Result<Self> {
        if count == 0 || count > MAX_COUNT {
            return Err(Error::invalid_query(format!(
                "count must be between 1 and {MAX_COUNT}, got {count}"
            )));
        }
        self.count = count;
        Ok(self)
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn extended(&self) -> bool {
        self.extended
    }

    /// Query-string parameters for the search endpoint
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.term.clone()),
            ("lang", self.lang.clone()),
            ("count", self.count.to_string()),
        ];
        if self.extended {
            params.push(("tweet_mode", "extended".to_string()));
        }
        params
    }
}
