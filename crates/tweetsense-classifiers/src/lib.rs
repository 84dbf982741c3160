//! TweetSense Classifiers
//!
//! Sentiment classification for batches of tweets.
//!
//! - [`Classifier`] is the text-in, label-out boundary to a trained model.
//!   [`LexiconClassifier`] is a keyword fallback; [`HttpClassifier`] talks to
//!   an external inference server.
//! - [`ClassifierRegistry`] builds each configured classifier once and shares
//!   the handle.
//! - [`SentimentPipeline`] maps labels onto sentiments and buckets the tweets.

pub mod classifier;
pub mod config;
pub mod pipeline;
pub mod registry;
pub mod remote;
pub mod sentiment;

pub use classifier::{ClassificationResult, Classifier};
pub use config::{ClassifierConfig, ClassifierSpec};
pub use pipeline::{
    CallMode, ClassificationReport, LabelPolicy, SentimentPipeline, SkippedItem,
};
pub use registry::{build_classifier, ClassifierRegistry};
pub use remote::HttpClassifier;
pub use sentiment::LexiconClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::pipeline::{CallMode, LabelPolicy, SentimentPipeline};
    pub use crate::registry::ClassifierRegistry;
    pub use crate::remote::HttpClassifier;
    pub use crate::sentiment::LexiconClassifier;
}
