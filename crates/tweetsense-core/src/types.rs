//! Core types for TweetSense

use crate::error::UnknownLabelError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label token the sentiment model emits for negative text
pub const LABEL_NEGATIVE: &str = "-1";
/// Label token the sentiment model emits for neutral text
pub const LABEL_NEUTRAL: &str = "0";
/// Label token the sentiment model emits for positive text
pub const LABEL_POSITIVE: &str = "1";

/// Sentiment of a single tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// All variants, in chart order
    pub const ALL: [Sentiment; 3] = [Self::Negative, Self::Neutral, Self::Positive];

    /// The classifier label token for this sentiment
    pub fn label(&self) -> &'static str {
        match self {
            Self::Negative => LABEL_NEGATIVE,
            Self::Neutral => LABEL_NEUTRAL,
            Self::Positive => LABEL_POSITIVE,
        }
    }

    /// Lowercase name, as used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses sentiment *names* (`negative`, `neutral`, `positive`).
///
/// Raw classifier labels go through [`map_label`] instead.
impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            other => Err(format!(
                "unknown sentiment '{other}', expected negative, neutral or positive"
            )),
        }
    }
}

/// Map a raw classifier label onto a [`Sentiment`].
///
/// `"-1"` is negative, `"0"` neutral and `"1"` positive. Every other input is
/// rejected with the offending string so the caller can skip the item or
/// abort the batch.
pub fn map_label(raw: &str) -> Result<Sentiment, UnknownLabelError> {
    match raw {
        LABEL_NEGATIVE => Ok(Sentiment::Negative),
        LABEL_NEUTRAL => Ok(Sentiment::Neutral),
        LABEL_POSITIVE => Ok(Sentiment::Positive),
        other => Err(UnknownLabelError::new(other)),
    }
}

/// A single tweet together with its classified sentiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Full, untruncated tweet text
    pub text: String,

    /// Output of the sentiment classifier
    pub sentiment: Sentiment,
}

impl Tweet {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }

    /// Build a tweet straight from a raw classifier label
    pub fn from_label(text: impl Into<String>, label: &str) -> Result<Self, UnknownLabelError> {
        Ok(Self::new(text, map_label(label)?))
    }
}

/// Tweets of one search result, partitioned by sentiment.
///
/// Each bucket keeps classification order. The value is built once per
/// search and replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTweets {
    negative: Vec<Tweet>,
    neutral: Vec<Tweet>,
    positive: Vec<Tweet>,
}

impl ClassifiedTweets {
    /// An aggregate with all three buckets empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Partition tweets into buckets, preserving iteration order within each
    pub fn from_tweets(tweets: impl IntoIterator<Item = Tweet>) -> Self {
        let mut out = Self::default();
        for tweet in tweets {
            match tweet.sentiment {
                Sentiment::Negative => out.negative.push(tweet),
                Sentiment::Neutral => out.neutral.push(tweet),
                Sentiment::Positive => out.positive.push(tweet),
            }
        }
        out
    }

    pub fn negative(&self) -> &[Tweet] {
        &self.negative
    }

    pub fn neutral(&self) -> &[Tweet] {
        &self.neutral
    }

    pub fn positive(&self) -> &[Tweet] {
        &self.positive
    }

    /// The bucket holding tweets of the given sentiment
    pub fn bucket(&self, sentiment: Sentiment) -> &[Tweet] {
        match sentiment {
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Positive => &self.positive,
        }
    }

    /// Total number of tweets across all buckets
    pub fn count(&self) -> usize {
        self.negative.len() + self.neutral.len() + self.positive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All tweets regardless of sentiment, in shuffled order.
    ///
    /// Every call reshuffles, so two calls usually disagree on order. Only the
    /// multiset of tweets is stable.
    pub fn all(&self) -> Vec<Tweet> {
        self.all_with_rng(&mut rand::thread_rng())
    }

    /// Same as [`all`](Self::all) with a caller-supplied RNG
    pub fn all_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Tweet> {
        let mut all: Vec<Tweet> = self
            .negative
            .iter()
            .chain(&self.neutral)
            .chain(&self.positive)
            .cloned()
            .collect();
        all.shuffle(rng);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> ClassifiedTweets {
        ClassifiedTweets::from_tweets(vec![
            Tweet::new("great day!", Sentiment::Positive),
            Tweet::new("terrible news", Sentiment::Negative),
            Tweet::new("it is Tuesday", Sentiment::Neutral),
            Tweet::new("love it", Sentiment::Positive),
        ])
    }

    fn sorted_texts(tweets: &[Tweet]) -> Vec<String> {
        let mut texts: Vec<String> = tweets.iter().map(|t| t.text.clone()).collect();
        texts.sort();
        texts
    }

    #[test]
    fn map_label_known_tokens() {
        assert_eq!(map_label("-1"), Ok(Sentiment::Negative));
        assert_eq!(map_label("0"), Ok(Sentiment::Neutral));
        assert_eq!(map_label("1"), Ok(Sentiment::Positive));
    }

    #[test]
    fn map_label_rejects_everything_else() {
        for raw in ["7", "", " 1", "positive", "+1", "-0"] {
            let err = map_label(raw).unwrap_err();
            assert_eq!(err.label, raw);
        }
    }

    #[test]
    fn label_round_trips_through_mapper() {
        for sentiment in Sentiment::ALL {
            assert_eq!(map_label(sentiment.label()), Ok(sentiment));
        }
    }

    #[test]
    fn sentiment_names_parse() {
        assert_eq!("Positive".parse::<Sentiment>(), Ok(Sentiment::Positive));
        assert_eq!(" neutral ".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert!("1".parse::<Sentiment>().is_err());
    }

    #[test]
    fn from_label_builds_tweet() {
        let tweet = Tweet::from_label("terrible news", "-1").unwrap();
        assert_eq!(tweet, Tweet::new("terrible news", Sentiment::Negative));
        assert!(Tweet::from_label("x", "2").is_err());
    }

    #[test]
    fn buckets_keep_insertion_order() {
        let tweets = sample();
        let positives: Vec<&str> = tweets.positive().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(positives, vec!["great day!", "love it"]);
        assert_eq!(tweets.negative().len(), 1);
        assert_eq!(tweets.neutral().len(), 1);
        assert_eq!(tweets.bucket(Sentiment::Positive), tweets.positive());
        assert_eq!(tweets.count(), 4);
    }

    #[test]
    fn empty_aggregate() {
        let tweets = ClassifiedTweets::empty();
        assert_eq!(tweets.count(), 0);
        assert!(tweets.is_empty());
        assert!(tweets.all().is_empty());
    }

    #[test]
    fn all_is_a_permutation_of_the_buckets() {
        let tweets = sample();
        let all = tweets.all();
        assert_eq!(all.len(), tweets.count());

        let mut buckets = Vec::new();
        for sentiment in Sentiment::ALL {
            buckets.extend_from_slice(tweets.bucket(sentiment));
        }
        assert_eq!(sorted_texts(&all), sorted_texts(&buckets));
    }

    #[test]
    fn all_with_seeded_rng_is_reproducible() {
        let tweets = sample();
        let a = tweets.all_with_rng(&mut StdRng::seed_from_u64(7));
        let b = tweets.all_with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_with_lowercase_sentiments() {
        let json = serde_json::to_value(Tweet::new("hi", Sentiment::Neutral)).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hi", "sentiment": "neutral"}));
    }

    fn sentiment_strategy() -> impl Strategy<Value = Sentiment> {
        prop_oneof![
            Just(Sentiment::Negative),
            Just(Sentiment::Neutral),
            Just(Sentiment::Positive),
        ]
    }

    proptest! {
        #[test]
        fn partition_loses_and_duplicates_nothing(
            items in proptest::collection::vec((".{1,20}", sentiment_strategy()), 0..50)
        ) {
            let tweets: Vec<Tweet> = items
                .iter()
                .map(|(text, sentiment)| Tweet::new(text.clone(), *sentiment))
                .collect();
            let classified = ClassifiedTweets::from_tweets(tweets.clone());

            prop_assert_eq!(classified.count(), tweets.len());
            prop_assert_eq!(classified.all().len(), tweets.len());

            for sentiment in Sentiment::ALL {
                let expected: Vec<Tweet> = tweets
                    .iter()
                    .filter(|t| t.sentiment == sentiment)
                    .cloned()
                    .collect();
                prop_assert_eq!(classified.bucket(sentiment), expected.as_slice());
            }
        }
    }
}
