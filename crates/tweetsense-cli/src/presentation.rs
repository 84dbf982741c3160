//! Terminal presentation of a classified search
//!
//! The chart shows one slice per sentiment sized by that bucket's own count.
//! Below it a single line rotates through example tweets: all tweets in
//! shuffled order by default, or one bucket once a sentiment is selected.

use serde::Serialize;
use tweetsense_core::{ClassifiedTweets, Sentiment, Tweet};

/// Shown when the selected bucket has no tweets
pub const EMPTY_SELECTION_TEXT: &str = "None in this classification.";

/// Shown when there is no aggregate to present
pub const NO_DATA_TEXT: &str = "No results, try again.";

const BAR_WIDTH: usize = 40;

/// One slice of the sentiment chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub value: usize,
    /// Share of the total in percent, 0 when there are no tweets
    pub percent: f64,
}

/// Three-slice proportional chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub slices: Vec<ChartSlice>,
    pub center_text: String,
}

impl ChartData {
    pub fn from_tweets(tweets: &ClassifiedTweets) -> Self {
        let total = tweets.count();
        let slices = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let value = tweets.bucket(sentiment).len();
                let percent = if total == 0 {
                    0.0
                } else {
                    value as f64 * 100.0 / total as f64
                };
                ChartSlice {
                    sentiment,
                    label: slice_label(sentiment),
                    value,
                    percent,
                }
            })
            .collect();

        Self {
            slices,
            center_text: format!("Last {total} tweets."),
        }
    }

    pub fn slice(&self, sentiment: Sentiment) -> Option<&ChartSlice> {
        self.slices.iter().find(|s| s.sentiment == sentiment)
    }

    /// Render as horizontal bars
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.center_text);
        out.push('\n');
        for slice in &self.slices {
            let filled = ((slice.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
            out.push_str(&format!(
                "  {:<8} {:>4} {:>5.1}% {}\n",
                slice.label,
                slice.value,
                slice.percent,
                "#".repeat(filled.min(BAR_WIDTH)),
            ));
        }
        out
    }
}

fn slice_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Negative => "Negative",
        Sentiment::Neutral => "Neutral",
        Sentiment::Positive => "Positive",
    }
}

/// What the rotating line shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// No aggregate (no search yet, or the last one failed)
    NoData,

    /// A selection with no tweets in it
    EmptySelection,

    /// One tweet
    Tweet(Tweet),
}

impl DisplayState {
    pub fn render(&self) -> String {
        match self {
            Self::NoData => NO_DATA_TEXT.to_string(),
            Self::EmptySelection => EMPTY_SELECTION_TEXT.to_string(),
            Self::Tweet(tweet) => format!("[{}] {}", tweet.sentiment, tweet.text),
        }
    }
}

/// State machine behind the rotating tweet line
#[derive(Debug, Clone, Default)]
pub struct TweetRotation {
    tweets: Option<ClassifiedTweets>,
    selection: Option<Sentiment>,
    selected: Vec<Tweet>,
    index: usize,
}

impl TweetRotation {
    /// Start rotating through all tweets of an aggregate
    pub fn new(tweets: Option<ClassifiedTweets>) -> Self {
        let mut rotation = Self {
            tweets,
            ..Self::default()
        };
        rotation.select(None);
        rotation
    }

    /// Replace the aggregate wholesale and reset to all tweets
    pub fn replace(&mut self, tweets: Option<ClassifiedTweets>) {
        self.tweets = tweets;
        self.select(None);
    }

    /// Select one bucket, or `None` for all tweets. Restarts from the top.
    pub fn select(&mut self, selection: Option<Sentiment>) {
        self.selection = selection;
        self.selected = match (&self.tweets, selection) {
            (None, _) => Vec::new(),
            (Some(tweets), None) => tweets.all(),
            (Some(tweets), Some(sentiment)) => tweets.bucket(sentiment).to_vec(),
        };
        self.index = 0;
    }

    pub fn selection(&self) -> Option<Sentiment> {
        self.selection
    }

    pub fn tweets(&self) -> Option<&ClassifiedTweets> {
        self.tweets.as_ref()
    }

    /// Current display, then advance (wrapping) to the next tweet
    pub fn next_display(&mut self) -> DisplayState {
        if self.tweets.is_none() {
            return DisplayState::NoData;
        }
        let Some(tweet) = self.selected.get(self.index).cloned() else {
            return DisplayState::EmptySelection;
        };

        self.index += 1;
        if self.index >= self.selected.len() {
            self.index = 0;
        }
        DisplayState::Tweet(tweet)
    }
}
