use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tweetsense_core::Sentiment;

#[derive(Parser, Debug)]
#[command(name = "tweetsense")]
#[command(
    author,
    version,
    about = "Search tweets, classify their sentiment and chart the result"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "tweetsense.yaml", env = "TWEETSENSE_CONFIG")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search tweets for a term and classify them
    Search {
        /// Search term
        term: String,

        /// Language filter
        #[arg(short, long)]
        lang: Option<String>,

        /// Number of tweets to request (1-100)
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Search API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// API consumer key
        #[arg(long, env = "TWITTER_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// API consumer secret
        #[arg(long, env = "TWITTER_API_SECRET", hide_env_values = true)]
        api_secret: Option<String>,

        /// Bearer token, used instead of key and secret
        #[arg(long, env = "TWITTER_BEARER_TOKEN", hide_env_values = true)]
        bearer_token: Option<String>,

        #[command(flatten)]
        classify: ClassifyArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Classify texts from a file (one per line) or stdin
    Classify {
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        #[command(flatten)]
        classify: ClassifyArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Classification overrides shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Classifier name from the configuration
    #[arg(long)]
    pub classifier: Option<String>,

    /// Call the classifier once per tweet instead of once per batch
    #[arg(long)]
    pub per_item: bool,

    /// Fail the whole batch on an unknown label instead of skipping the tweet
    #[arg(long)]
    pub abort_on_unknown: bool,
}

/// Presentation overrides shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Rotate only through one sentiment: negative, neutral or positive
    #[arg(short, long, value_parser = parse_sentiment)]
    pub select: Option<Sentiment>,

    /// Number of tweets to show in rotation
    #[arg(short, long)]
    pub rotations: Option<usize>,

    /// Seconds between two tweets
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Print the classified tweets as JSON instead of the chart
    #[arg(long)]
    pub json: bool,
}

fn parse_sentiment(s: &str) -> Result<Sentiment, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_overrides() {
        let cli = Cli::try_parse_from([
            "tweetsense",
            "search",
            "rust lang",
            "-n",
            "20",
            "--per-item",
            "--select",
            "positive",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Search {
                term,
                count,
                classify,
                display,
                ..
            } => {
                assert_eq!(term, "rust lang");
                assert_eq!(count, Some(20));
                assert!(classify.per_item);
                assert!(!classify.abort_on_unknown);
                assert_eq!(display.select, Some(Sentiment::Positive));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_classify_from_stdin() {
        let cli = Cli::try_parse_from(["tweetsense", "classify", "--json", "--abort-on-unknown"])
            .unwrap();
        match cli.command {
            Commands::Classify {
                input,
                classify,
                display,
            } => {
                assert!(input.is_none());
                assert!(classify.abort_on_unknown);
                assert!(display.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_selection() {
        assert!(Cli::try_parse_from(["tweetsense", "classify", "--select", "1"]).is_err());
    }
}
