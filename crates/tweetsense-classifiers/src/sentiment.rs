//! Lexicon sentiment classifier
//!
//! Keyword-based fallback used when no inference endpoint is configured. It
//! emits the same label tokens as the trained model.

use crate::classifier::{ClassificationResult, Classifier};
use aho_corasick::AhoCorasick;
use tweetsense_core::types::{LABEL_NEGATIVE, LABEL_NEUTRAL, LABEL_POSITIVE};
use tweetsense_core::Result;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "love",
    "amazing",
    "wonderful",
    "happy",
    "fantastic",
    "awesome",
    "best",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "horrible",
    "worst",
    "sad",
    "angry",
    "disappointed",
    "poor",
];

pub struct LexiconClassifier {
    name: String,
    positive: AhoCorasick,
    negative: AhoCorasick,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        Self::with_words(name, POSITIVE_WORDS, NEGATIVE_WORDS)
    }

    /// The built-in (positive, negative) word lists
    pub fn default_words() -> (Vec<String>, Vec<String>) {
        (
            POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }

    /// Build a classifier over custom word lists
    pub fn with_words<P, N>(name: impl Into<String>, positive: &[P], negative: &[N]) -> Result<Self>
    where
        P: AsRef<[u8]>,
        N: AsRef<[u8]>,
    {
        let positive = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(positive)
            .map_err(|e| {
                tweetsense_core::Error::classifier(format!(
                    "Failed to build positive sentiment matcher: {e}"
                ))
            })?;

        let negative = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(negative)
            .map_err(|e| {
                tweetsense_core::Error::classifier(format!(
                    "Failed to build negative sentiment matcher: {e}"
                ))
            })?;

        Ok(Self {
            name: name.into(),
            positive,
            negative,
        })
    }
}

#[async_trait::async_trait]
impl Classifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let positive_hits = self.positive.find_iter(text).count() as f32;
        let negative_hits = self.negative.find_iter(text).count() as f32;
        let total = positive_hits + negative_hits;

        // score is the positive share; no hits at all reads as neutral
        let score = if total == 0.0 {
            0.5
        } else {
            positive_hits / total
        };
        let label = if positive_hits > negative_hits {
            LABEL_POSITIVE
        } else if negative_hits > positive_hits {
            LABEL_NEGATIVE
        } else {
            LABEL_NEUTRAL
        };

        Ok(ClassificationResult {
            label: label.to_string(),
            score: Some(score),
            model: Some("sentiment-lexicon".to_string()),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
