//! Classifier registry
//!
//! Loading a model is expensive, so each configured classifier is built at
//! most once and shared as an `Arc` for the rest of the session. Names are
//! matched without regard to ASCII case, as layered config sources lowercase
//! map keys.

use crate::{Classifier, ClassifierConfig, ClassifierSpec, HttpClassifier, LexiconClassifier};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tweetsense_core::{Error, Result};

/// Registry for building and caching classifiers
pub struct ClassifierRegistry {
    /// Loaded classifier configuration
    config: ClassifierConfig,

    /// Instantiated classifiers by name
    loaded: RwLock<HashMap<String, Arc<dyn Classifier>>>,
}

impl ClassifierRegistry {
    /// Create a new registry from configuration; nothing is loaded yet
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The configured default classifier
    pub fn default_classifier(&self) -> Result<Arc<dyn Classifier>> {
        self.get_or_load(&self.config.default)
    }

    /// Get a classifier by name, building it on first use
    pub fn get_or_load(&self, name: &str) -> Result<Arc<dyn Classifier>> {
        let key = name.to_ascii_lowercase();
        if let Some(classifier) = self.loaded.read().get(&key) {
            return Ok(Arc::clone(classifier));
        }

        let mut loaded = self.loaded.write();
        // another caller may have built it between the two locks
        if let Some(classifier) = loaded.get(&key) {
            return Ok(Arc::clone(classifier));
        }

        let spec = self
            .config
            .get(name)
            .ok_or_else(|| Error::config(format!("Classifier '{}' not found", name)))?;
        let classifier = build_classifier(&key, spec)?;
        info!(classifier = %key, "Loaded classifier");

        loaded.insert(key, Arc::clone(&classifier));
        Ok(classifier)
    }

    /// Number of classifiers loaded so far
    pub fn loaded_count(&self) -> usize {
        self.loaded.read().len()
    }

    /// Drop all loaded handles; outstanding `Arc`s stay valid
    pub fn unload_all(&self) {
        let count = {
            let mut loaded = self.loaded.write();
            let count = loaded.len();
            loaded.clear();
            count
        };
        debug!(count, "Unloaded classifiers");
    }
}

/// Construct a classifier from its specification
pub fn build_classifier(name: &str, spec: &ClassifierSpec) -> Result<Arc<dyn Classifier>> {
    match spec {
        ClassifierSpec::Lexicon { positive, negative } => {
            let classifier = match (positive, negative) {
                (None, None) => LexiconClassifier::with_name(name)?,
                (positive, negative) => {
                    let defaults = LexiconClassifier::default_words();
                    let positive = positive.clone().unwrap_or_else(|| defaults.0);
                    let negative = negative.clone().unwrap_or_else(|| defaults.1);
                    LexiconClassifier::with_words(name, &positive, &negative)?
                }
            };
            Ok(Arc::new(classifier))
        }
        ClassifierSpec::Http {
            endpoint,
            timeout_secs,
            model,
        } => {
            let mut classifier =
                HttpClassifier::new(name, endpoint, Duration::from_secs(*timeout_secs))?;
            if let Some(model) = model {
                classifier = classifier.with_model(model);
            }
            Ok(Arc::new(classifier))
        }
    }
}
