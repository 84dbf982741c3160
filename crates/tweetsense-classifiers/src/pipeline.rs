//! Classify-and-bucket pipeline
//!
//! Runs a batch of texts through one classifier, maps every raw label onto a
//! [`Sentiment`] and partitions the resulting tweets into a
//! [`ClassifiedTweets`] aggregate.
//!
//! Two things can go wrong:
//! - the classifier itself fails (load error, inference error, timeout, wrong
//!   number of results). The whole pass fails and no aggregate is produced.
//! - a single label is not one of the known tokens. [`LabelPolicy`] decides
//!   whether that item is skipped or the batch is aborted.

use crate::{ClassificationResult, Classifier};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};
use tweetsense_core::{map_label, ClassifiedTweets, Error, Result, Sentiment, Tweet};

/// How the classifier is invoked for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMode {
    /// One `classify_batch` call covering every text
    #[default]
    Batch,

    /// One `classify` call per text, run concurrently
    PerItem,
}

/// What to do with a label the mapper does not recognise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Drop the item, report it and keep going
    #[default]
    Skip,

    /// Fail the whole batch
    Abort,
}

/// An input that was left out of the aggregate because of its label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedItem {
    /// Position in the input sequence
    pub index: usize,

    /// Input text, as given
    pub text: String,

    /// Label the classifier returned
    pub label: String,

    /// Confidence the classifier attached to that label
    pub score: Option<f32>,
}

/// Outcome of one pipeline pass
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    /// Successfully classified tweets
    pub tweets: ClassifiedTweets,

    /// Items dropped under [`LabelPolicy::Skip`]
    pub skipped: Vec<SkippedItem>,

    /// Model that produced the labels, when the classifier reports one
    pub model: Option<String>,

    /// Total pipeline execution time
    pub latency_us: u64,
}

/// Pipeline that turns raw texts into a [`ClassifiedTweets`] aggregate
#[derive(Clone)]
pub struct SentimentPipeline {
    classifier: Arc<dyn Classifier>,
    mode: CallMode,
    policy: LabelPolicy,
    timeout: Option<Duration>,
}

impl SentimentPipeline {
    /// Create a pipeline around a shared classifier handle
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            mode: CallMode::default(),
            policy: LabelPolicy::default(),
            timeout: None,
        }
    }

    pub fn with_mode(mut self, mode: CallMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: LabelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound the classifier call; exceeding it fails with [`Error::Timeout`]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    pub fn mode(&self) -> CallMode {
        self.mode
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    /// Classify texts and partition them by sentiment
    pub async fn classify(&self, texts: &[String]) -> Result<ClassificationReport> {
        let start = Instant::now();

        let results = match self.labels(texts).await {
            Ok(results) => results,
            Err(e) => {
                error!(
                    classifier = self.classifier.name(),
                    error = %e,
                    "Failed to classify tweets"
                );
                metrics::counter!("tweetsense_classifier_errors_total", "kind" => e.kind())
                    .increment(1);
                return Err(e);
            }
        };

        let model = results.iter().find_map(|r| r.model.clone());
        let mut tweets = Vec::with_capacity(texts.len());
        let mut skipped = Vec::new();

        for (index, (text, result)) in texts.iter().zip(results).enumerate() {
            match map_label(&result.label) {
                Ok(sentiment) => tweets.push(Tweet::new(text.clone(), sentiment)),
                Err(e) => match self.policy {
                    LabelPolicy::Abort => {
                        error!(index, label = %e.label, "Unknown label, aborting batch");
                        metrics::counter!("tweetsense_labels_rejected_total").increment(1);
                        return Err(e.into());
                    }
                    LabelPolicy::Skip => {
                        warn!(index, label = %e.label, "Unknown label, skipping tweet");
                        skipped.push(SkippedItem {
                            index,
                            text: text.clone(),
                            label: e.label,
                            score: result.score,
                        });
                    }
                },
            }
        }

        let tweets = ClassifiedTweets::from_tweets(tweets);
        let latency_us = start.elapsed().as_micros() as u64;
        record_metrics(&tweets, skipped.len(), latency_us);

        debug!(
            model = model.as_deref().unwrap_or("unknown"),
            negative = tweets.negative().len(),
            neutral = tweets.neutral().len(),
            positive = tweets.positive().len(),
            skipped = skipped.len(),
            latency_us,
            "Mapped {} negative, {} neutral and {} positive tweets",
            tweets.negative().len(),
            tweets.neutral().len(),
            tweets.positive().len(),
        );

        Ok(ClassificationReport {
            tweets,
            skipped,
            model,
            latency_us,
        })
    }

    /// Obtain exactly one classifier result per text, in input order
    async fn labels(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let results = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.invoke(texts))
                .await
                .map_err(|_| Error::Timeout)??,
            None => self.invoke(texts).await?,
        };

        if results.len() != texts.len() {
            return Err(Error::classifier(format!(
                "Classifier '{}' returned {} labels for {} texts",
                self.classifier.name(),
                results.len(),
                texts.len()
            )));
        }

        Ok(results)
    }

    async fn invoke(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        match self.mode {
            CallMode::Batch => self.classifier.classify_batch(texts).await,
            CallMode::PerItem => {
                let futures = texts.iter().map(|text| self.classifier.classify(text));
                join_all(futures).await.into_iter().collect()
            }
        }
    }
}

fn record_metrics(tweets: &ClassifiedTweets, skipped: usize, latency_us: u64) {
    for sentiment in Sentiment::ALL {
        metrics::counter!("tweetsense_items_classified_total", "sentiment" => sentiment.as_str())
            .increment(tweets.bucket(sentiment).len() as u64);
    }
    if skipped > 0 {
        metrics::counter!("tweetsense_labels_rejected_total").increment(skipped as u64);
    }
    metrics::histogram!("tweetsense_pipeline_latency_us").record(latency_us as f64);
}
