//! Configuration for classifier adapters
//!
//! Classifier names are case-insensitive: `Remote` and `remote` name the
//! same entry.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tweetsense_core::{Error, Result};

/// Configuration for all classifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classifier used when none is named explicitly
    #[serde(default = "default_classifier")]
    pub default: String,

    /// Classifier specifications by name
    #[serde(default = "default_classifiers")]
    pub classifiers: HashMap<String, ClassifierSpec>,
}

/// How to construct one classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClassifierSpec {
    /// Built-in keyword lexicon
    Lexicon {
        /// Replacement positive word list
        #[serde(default)]
        positive: Option<Vec<String>>,

        /// Replacement negative word list
        #[serde(default)]
        negative: Option<Vec<String>>,
    },

    /// External inference server
    Http {
        endpoint: String,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,

        /// Model name reported in result metadata
        #[serde(default)]
        model: Option<String>,
    },
}

impl ClassifierConfig {
    /// Load a standalone classifier configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Parse a classifier configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("Invalid classifier config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that names are unique ignoring case and the default is defined
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in self.classifiers.keys() {
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(Error::config(format!(
                    "Classifier '{}' is defined more than once",
                    name
                )));
            }
        }

        if self.get(&self.default).is_none() {
            return Err(Error::config(format!(
                "Default classifier '{}' is not defined",
                self.default
            )));
        }
        Ok(())
    }

    /// Look up a classifier specification, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&ClassifierSpec> {
        self.classifiers.get(name).or_else(|| {
            self.classifiers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, spec)| spec)
        })
    }

    /// Names of all configured classifiers, sorted
    pub fn classifier_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classifiers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default: default_classifier(),
            classifiers: default_classifiers(),
        }
    }
}

fn default_classifier() -> String {
    "lexicon".to_string()
}

fn default_classifiers() -> HashMap<String, ClassifierSpec> {
    let mut classifiers = HashMap::new();
    classifiers.insert(
        default_classifier(),
        ClassifierSpec::Lexicon {
            positive: None,
            negative: None,
        },
    );
    classifiers
}

fn default_timeout_secs() -> u64 {
    30
}
