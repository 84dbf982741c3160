//! TweetSense Core
//!
//! Core types and utilities shared across TweetSense components.
//!
//! This crate provides:
//! - The workspace error type and result alias
//! - `Sentiment` and the label mapper that turns raw classifier output into it
//! - `Tweet`, an immutable (text, sentiment) pair
//! - `ClassifiedTweets`, the per-search partition of tweets into three buckets

pub mod error;
pub mod types;

pub use error::{Error, Result, UnknownLabelError};
pub use types::{map_label, ClassifiedTweets, Sentiment, Tweet};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, UnknownLabelError};
    pub use crate::types::{map_label, ClassifiedTweets, Sentiment, Tweet};
}
