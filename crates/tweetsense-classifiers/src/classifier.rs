//! Classifier trait and common types

use async_trait::async_trait;
use tweetsense_core::Result;

/// Text-in, label-out sentiment classifier.
///
/// Labels are the raw model tokens (`"-1"`, `"0"`, `"1"`); mapping them onto
/// [`tweetsense_core::Sentiment`] is the pipeline's job, so an adapter never
/// needs to trust its own output.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a single text
    async fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Classify a batch of texts.
    ///
    /// Must return exactly one result per input, in input order. The default
    /// falls back to one `classify` call per item.
    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.classify(text).await?);
        }
        Ok(results)
    }

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Raw label as emitted by the model
    pub label: String,

    /// Confidence score (0.0-1.0), if the model reports one
    pub score: Option<f32>,

    /// Model name or version, if known
    pub model: Option<String>,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            score: None,
            model: None,
        }
    }
}
