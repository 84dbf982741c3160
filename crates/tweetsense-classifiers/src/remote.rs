//! Remote inference classifier
//!
//! Sends batches to an external model server:
//! ```text
//! POST {endpoint}  {"inputs": ["text", ...]}
//! 200              {"predictions": [{"label": "1", "score": 0.93}, ...]}
//! ```

use crate::classifier::{ClassificationResult, Classifier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;
use tweetsense_core::{Error, Result};

/// Classifier backed by an HTTP inference endpoint
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    name: String,
    endpoint: String,
    model: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    inputs: &'a [String],
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    predictions: Vec<Prediction>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    #[serde(default)]
    score: Option<f32>,
}

impl HttpClassifier {
    /// Create a classifier for the given endpoint with a request timeout
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::classifier(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            endpoint: endpoint.into(),
            model: None,
            client,
        })
    }

    /// Model name reported in results when the server does not send one
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    async fn predict(&self, texts: &[String]) -> Result<PredictResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { inputs: texts })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::classifier(format!("Inference request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::classifier(format!(
                "Inference endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<PredictResponse>()
            .await
            .map_err(|e| Error::classifier(format!("Malformed inference response: {e}")))
    }

    pub(crate) fn build_results(
        &self,
        response: PredictResponse,
        expected: usize,
    ) -> Result<Vec<ClassificationResult>> {
        if response.predictions.len() != expected {
            return Err(Error::classifier(format!(
                "Inference endpoint returned {} predictions for {} inputs",
                response.predictions.len(),
                expected
            )));
        }

        let model = response.model.or_else(|| self.model.clone());
        Ok(response
            .predictions
            .into_iter()
            .map(|p| ClassificationResult {
                label: p.label,
                score: p.score,
                model: model.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let mut results = self.classify_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| Error::classifier("Inference endpoint returned no prediction"))
    }

    async fn classify_batch(&self, texts: &[String]) -> Result<Vec<ClassificationResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let response = self.predict(texts).await?;
        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            classifier = %self.name,
            endpoint = %self.endpoint,
            inputs = texts.len(),
            latency_us,
            "Remote batch classified"
        );

        self.build_results(response, texts.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> HttpClassifier {
        HttpClassifier::new("remote", "http://127.0.0.1:9/predict", Duration::from_secs(1))
            .unwrap()
            .with_model("twitter-sentiment")
    }

    #[test]
    fn parses_predictions_in_order() {
        let response: PredictResponse = serde_json::from_str(
            r#"{"predictions": [{"label": "1", "score": 0.9}, {"label": "-1"}]}"#,
        )
        .unwrap();

        let results = classifier().build_results(response, 2).unwrap();
        assert_eq!(results[0].label, "1");
        assert_eq!(results[0].score, Some(0.9));
        assert_eq!(results[1].label, "-1");
        assert_eq!(results[1].score, None);
        assert_eq!(results[1].model.as_deref(), Some("twitter-sentiment"));
    }

    #[test]
    fn length_mismatch_is_a_classifier_error() {
        let response: PredictResponse =
            serde_json::from_str(r#"{"predictions": [{"label": "0"}]}"#).unwrap();

        let err = classifier().build_results(response, 3).unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));
    }

    #[tokio::test]
    async fn empty_batch_skips_the_request() {
        let results = classifier().classify_batch(&[]).await.unwrap();
        assert!(results.is_empty());
    }
}
