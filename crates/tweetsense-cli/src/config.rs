//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional YAML
//! file, then `TWEETSENSE__*` environment variables
//! (e.g. `TWEETSENSE__SEARCH__LANG=de`). CLI flags are applied last.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tweetsense_classifiers::{CallMode, ClassifierConfig, LabelPolicy};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub classifiers: ClassifierConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Search service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Language filter
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Tweets requested per search
    #[serde(default = "default_count")]
    pub count: u32,

    /// Bound on the whole search exchange
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    /// Takes precedence over the key/secret pair
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            lang: default_lang(),
            count: default_count(),
            timeout_secs: default_search_timeout(),
            api_key: None,
            api_secret: None,
            bearer_token: None,
        }
    }
}

/// Classification pass settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Classifier name; the registry default when unset
    #[serde(default)]
    pub classifier: Option<String>,

    #[serde(default)]
    pub mode: CallMode,

    #[serde(default)]
    pub on_unknown_label: LabelPolicy,

    #[serde(default = "default_classify_timeout")]
    pub timeout_secs: u64,
}

impl PipelineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classifier: None,
            mode: CallMode::default(),
            on_unknown_label: LabelPolicy::default(),
            timeout_secs: default_classify_timeout(),
        }
    }
}

/// Rotating display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Seconds between two tweets
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Number of tweets shown before exiting
    #[serde(default = "default_rotations")]
    pub rotations: usize,
}

impl DisplayConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            rotations: default_rotations(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional YAML file plus environment
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(::config::Environment::with_prefix("TWEETSENSE").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config
            .classifiers
            .validate()
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        Ok(config)
    }
}

fn default_base_url() -> String {
    tweetsense_search::twitter::DEFAULT_BASE_URL.to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_count() -> u32 {
    100
}

fn default_search_timeout() -> u64 {
    30
}

fn default_classify_timeout() -> u64 {
    60
}

fn default_interval() -> u64 {
    5
}

fn default_rotations() -> usize {
    10
}
