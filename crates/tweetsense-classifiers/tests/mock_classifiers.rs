//! Mock classifiers for testing
//!
//! Provides configurable mock implementations of the Classifier trait
//! for testing the pipeline's call modes, label policies and error handling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tweetsense_classifiers::{
    CallMode, ClassificationResult, Classifier, LabelPolicy, SentimentPipeline, SkippedItem,
};
use tweetsense_core::{Error, Result, Sentiment, Tweet};

/// A classifier that answers from a fixed text -> label script
pub struct MockClassifier {
    name: String,
    labels: HashMap<String, String>,
    default_label: String,
    simulated_latency: Option<Duration>,
    single_calls: AtomicU32,
    batch_calls: AtomicU32,
}

impl MockClassifier {
    /// Create a new mock classifier with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: HashMap::new(),
            default_label: "0".to_string(),
            simulated_latency: None,
            single_calls: AtomicU32::new(0),
            batch_calls: AtomicU32::new(0),
        }
    }

    /// Script the label returned for a text
    pub fn with_label(mut self, text: &str, label: &str) -> Self {
        self.labels.insert(text.to_string(), label.to_string());
        self
    }

    /// Label for texts that are not scripted
    pub fn with_default_label(mut self, label: &str) -> Self {
        self.default_label = label.to_string();
        self
    }

    /// Set simulated latency for this classifier
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = Some(latency);
        self
    }

    pub fn single_calls(&self) -> u32 {
        self.single_calls.load(Ordering::Relaxed)
    }

    pub fn batch_calls(&self) -> u32 {
        self.batch_calls.load(Ordering::Relaxed)
    }

    async fn label_for(&self, text: &str) -> ClassificationResult {
        if let Some(latency) = self.simulated_latency {
            tokio::time::sleep(latency).await;
        }
        let label = self.labels.get(text).unwrap_or(&self.default_label);
        ClassificationResult::new(label.clone())
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.single_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.label_for(text).await)
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        self.batch_calls.fetch_add(1, Ordering::Relaxed);
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.label_for(text).await);
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier that always fails - for testing error paths
pub struct FailingClassifier {
    name: String,
    error_message: String,
}

impl FailingClassifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            error_message: "Simulated model load failure".to_string(),
        }
    }
}

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassificationResult> {
        Err(Error::classifier(&self.error_message))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A batch classifier that drops the last result
pub struct ShortBatchClassifier;

#[async_trait]
impl Classifier for ShortBatchClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassificationResult> {
        Ok(ClassificationResult::new("0"))
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        Ok(texts
            .iter()
            .skip(1)
            .map(|_| ClassificationResult::new("0"))
            .collect())
    }

    fn name(&self) -> &str {
        "short"
    }
}

/// Returns each text verbatim as its label
pub struct EchoClassifier;

#[async_trait]
impl Classifier for EchoClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(ClassificationResult::new(text))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn scripted() -> MockClassifier {
    MockClassifier::new("scripted")
        .with_label("great day!", "1")
        .with_label("terrible news", "-1")
        .with_label("it is Tuesday", "0")
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let pipeline = SentimentPipeline::new(Arc::new(scripted()));

    let report = pipeline
        .classify(&texts(&["great day!", "terrible news", "it is Tuesday"]))
        .await
        .unwrap();

    assert_eq!(report.tweets.positive(), &[Tweet::new("great day!", Sentiment::Positive)]);
    assert_eq!(report.tweets.negative(), &[Tweet::new("terrible news", Sentiment::Negative)]);
    assert_eq!(report.tweets.neutral(), &[Tweet::new("it is Tuesday", Sentiment::Neutral)]);
    assert_eq!(report.tweets.count(), 3);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn test_batch_and_per_item_are_equivalent() {
    let input = texts(&[
        "terrible news",
        "great day!",
        "it is Tuesday",
        "great day!",
        "unscripted",
    ]);

    let batch_classifier = Arc::new(scripted().with_default_label("-1"));
    let per_item_classifier = Arc::new(scripted().with_default_label("-1"));

    let batch = SentimentPipeline::new(batch_classifier.clone()).with_mode(CallMode::Batch);
    let per_item =
        SentimentPipeline::new(per_item_classifier.clone()).with_mode(CallMode::PerItem);

    let batch_report = batch.classify(&input).await.unwrap();
    let per_item_report = per_item.classify(&input).await.unwrap();

    assert_eq!(batch_report.tweets, per_item_report.tweets);
    assert_eq!(batch_classifier.batch_calls(), 1);
    assert_eq!(batch_classifier.single_calls(), 0);
    assert_eq!(per_item_classifier.batch_calls(), 0);
    assert_eq!(per_item_classifier.single_calls(), 5);
}

#[tokio::test]
async fn test_bucket_order_follows_input_order() {
    let pipeline = SentimentPipeline::new(Arc::new(MockClassifier::new("all-positive").with_default_label("1")));

    let report = pipeline.classify(&texts(&["c", "a", "b"])).await.unwrap();

    let order: Vec<&str> = report.tweets.positive().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_unknown_label_is_skipped_by_default() {
    let classifier = scripted().with_label("weird", "7");
    let pipeline = SentimentPipeline::new(Arc::new(classifier));

    let report = pipeline
        .classify(&texts(&["great day!", "weird", "terrible news"]))
        .await
        .unwrap();

    assert_eq!(report.tweets.count(), 2);
    assert_eq!(
        report.skipped,
        vec![SkippedItem {
            index: 1,
            text: "weird".to_string(),
            label: "7".to_string(),
            score: None,
        }]
    );
}

#[tokio::test]
async fn test_unknown_label_aborts_under_abort_policy() {
    let classifier = scripted().with_label("weird", "7");
    let pipeline = SentimentPipeline::new(Arc::new(classifier)).with_policy(LabelPolicy::Abort);

    let err = pipeline
        .classify(&texts(&["great day!", "weird"]))
        .await
        .unwrap_err();

    match err {
        Error::UnknownLabel(e) => assert_eq!(e.label, "7"),
        other => panic!("expected unknown label error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_classifier_failure_fails_the_pipeline() {
    let pipeline = SentimentPipeline::new(Arc::new(FailingClassifier::new("broken")));

    let result = pipeline.classify(&texts(&["anything"])).await;
    assert!(matches!(result, Err(Error::Classifier(_))));

    let per_item = SentimentPipeline::new(Arc::new(FailingClassifier::new("broken")))
        .with_mode(CallMode::PerItem);
    assert!(per_item.classify(&texts(&["a", "b"])).await.is_err());
}

#[tokio::test]
async fn test_failing_classifier_is_not_called_for_empty_input() {
    let pipeline = SentimentPipeline::new(Arc::new(FailingClassifier::new("broken")));

    let report = pipeline.classify(&[]).await.unwrap();
    assert_eq!(report.tweets.count(), 0);
}

#[tokio::test]
async fn test_batch_length_mismatch_is_rejected() {
    let pipeline = SentimentPipeline::new(Arc::new(ShortBatchClassifier));

    let result = pipeline.classify(&texts(&["a", "b", "c"])).await;
    assert!(matches!(result, Err(Error::Classifier(_))));
}

#[tokio::test(start_paused = true)]
async fn test_slow_classifier_times_out() {
    let classifier = scripted().with_latency(Duration::from_secs(5));
    let pipeline = SentimentPipeline::new(Arc::new(classifier)).with_timeout(Duration::from_millis(50));

    let result = pipeline.classify(&texts(&["great day!"])).await;
    assert!(matches!(result, Err(Error::Timeout)));
}

#[tokio::test(start_paused = true)]
async fn test_fast_classifier_within_timeout() {
    let classifier = scripted().with_latency(Duration::from_millis(10));
    let pipeline = SentimentPipeline::new(Arc::new(classifier)).with_timeout(Duration::from_secs(1));

    let report = pipeline.classify(&texts(&["great day!"])).await.unwrap();
    assert_eq!(report.tweets.positive().len(), 1);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn label_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("-1".to_string()),
            Just("0".to_string()),
            Just("1".to_string()),
            Just("7".to_string()),
            "[a-z]{1,4}",
        ]
    }

    proptest! {
        #[test]
        fn buckets_partition_the_labelled_subset(
            input in proptest::collection::vec(label_strategy(), 0..40)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let pipeline = SentimentPipeline::new(Arc::new(EchoClassifier));
            let report = runtime.block_on(pipeline.classify(&input)).unwrap();

            let known = input
                .iter()
                .filter(|l| matches!(l.as_str(), "-1" | "0" | "1"))
                .count();
            prop_assert_eq!(report.tweets.count(), known);
            prop_assert_eq!(report.skipped.len(), input.len() - known);
            prop_assert_eq!(report.tweets.all().len(), known);

            for sentiment in Sentiment::ALL {
                let bucket = report.tweets.bucket(sentiment);
                prop_assert!(bucket.iter().all(|t| t.text == sentiment.label()));
                let expected = input.iter().filter(|l| l.as_str() == sentiment.label()).count();
                prop_assert_eq!(bucket.len(), expected);
            }
        }
    }
}
