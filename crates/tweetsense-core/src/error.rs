//! Error types for TweetSense

/// Result type alias using TweetSense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Raised when the classifier returns a label outside the known token set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment label: {label:?}")]
pub struct UnknownLabelError {
    /// The offending raw label, verbatim
    pub label: String,
}

impl UnknownLabelError {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Core error type for TweetSense operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier could not be loaded or failed to predict
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Classifier produced a label the mapper does not know
    #[error(transparent)]
    UnknownLabel(#[from] UnknownLabelError),

    /// Search service call failed
    #[error("search error: {0}")]
    Search(String),

    /// Search term rejected before any request was made
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new search error
    pub fn search(msg: impl Into<String>) -> Self {
        Self::Search(msg.into())
    }

    /// Create a new invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-friendly kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Classifier(_) => "classifier",
            Self::UnknownLabel(_) => "unknown_label",
            Self::Search(_) => "search",
            Self::InvalidQuery(_) => "invalid_query",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Timeout => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}
