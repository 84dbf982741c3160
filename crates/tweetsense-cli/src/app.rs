//! Search, classify and present

use crate::cli::{ClassifyArgs, DisplayArgs};
use crate::config::{AppConfig, DisplayConfig, SearchConfig};
use crate::presentation::{ChartData, DisplayState, TweetRotation};
use std::time::Duration;
use tracing::{error, info};
use tweetsense_classifiers::{
    CallMode, ClassificationReport, ClassifierRegistry, LabelPolicy, SentimentPipeline,
};
use tweetsense_core::{ClassifiedTweets, Error, Result};
use tweetsense_search::{Credentials, SearchClient, SearchQuery, TwitterSearchClient};

impl AppConfig {
    /// Fold classification flags into the pipeline section
    pub fn apply_classify_args(&mut self, args: &ClassifyArgs) {
        if let Some(classifier) = &args.classifier {
            self.pipeline.classifier = Some(classifier.clone());
        }
        if args.per_item {
            self.pipeline.mode = CallMode::PerItem;
        }
        if args.abort_on_unknown {
            self.pipeline.on_unknown_label = LabelPolicy::Abort;
        }
    }

    /// Fold display flags into the display section
    pub fn apply_display_args(&mut self, args: &DisplayArgs) {
        if let Some(rotations) = args.rotations {
            self.display.rotations = rotations;
        }
        if let Some(interval) = args.interval {
            self.display.interval_secs = interval;
        }
    }
}

/// Build the pipeline around a classifier handle from the registry
pub fn build_pipeline(config: &AppConfig, registry: &ClassifierRegistry) -> Result<SentimentPipeline> {
    let classifier = match &config.pipeline.classifier {
        Some(name) => registry.get_or_load(name)?,
        None => registry.default_classifier()?,
    };
    info!(
        classifier = classifier.name(),
        mode = ?config.pipeline.mode,
        policy = ?config.pipeline.on_unknown_label,
        "Pipeline ready"
    );

    Ok(SentimentPipeline::new(classifier)
        .with_mode(config.pipeline.mode)
        .with_policy(config.pipeline.on_unknown_label)
        .with_timeout(config.pipeline.timeout()))
}

/// Build the search client from configured credentials
pub fn build_search_client(config: &SearchConfig) -> Result<TwitterSearchClient> {
    let credentials = match (&config.bearer_token, &config.api_key, &config.api_secret) {
        (Some(token), _, _) => Credentials::Bearer(token.clone()),
        (None, Some(key), Some(secret)) => Credentials::Consumer {
            key: key.clone(),
            secret: secret.clone(),
        },
        _ => {
            return Err(Error::config(
                "missing API credentials: set TWITTER_BEARER_TOKEN or TWITTER_API_KEY and TWITTER_API_SECRET",
            ))
        }
    };

    Ok(TwitterSearchClient::new(credentials, config.timeout())?.with_base_url(&config.base_url))
}

/// Build the search query from configuration
pub fn build_query(term: &str, config: &SearchConfig) -> Result<SearchQuery> {
    SearchQuery::new(term)?
        .with_lang(config.lang.clone())
        .with_count(config.count)
}

/// One search followed by one classification pass
pub async fn search_and_classify(
    client: &dyn SearchClient,
    pipeline: &SentimentPipeline,
    query: &SearchQuery,
    search_timeout: Duration,
) -> Result<ClassificationReport> {
    let texts = tokio::time::timeout(search_timeout, client.search(query))
        .await
        .map_err(|_| Error::Timeout)??;
    info!(term = query.term(), tweets = texts.len(), "Fetched tweets");

    pipeline.classify(&texts).await
}

/// Run a step unless the user presses Ctrl-C first; `None` means cancelled
pub async fn cancellable<T>(step: impl std::future::Future<Output = T>) -> Option<T> {
    tokio::select! {
        result = step => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    }
}

/// Report a failed search/classification and print the empty state
pub fn report_failure(err: &Error) {
    error!(error = %err, kind = err.kind(), "No results");
    println!("{}", DisplayState::NoData.render());
}

/// Pass a step's result through, reporting it first when it failed
pub fn reported<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        report_failure(e);
    }
    result
}

/// One text per non-blank line, each kept exactly as written
pub fn split_texts(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Print the chart (or JSON) and rotate through example tweets
pub async fn present(
    report: ClassificationReport,
    display: &DisplayConfig,
    args: &DisplayArgs,
) -> anyhow::Result<()> {
    if !report.skipped.is_empty() {
        info!(skipped = report.skipped.len(), "Some tweets had unknown labels");
    }

    if args.json {
        let output = serde_json::json!({
            "count": report.tweets.count(),
            "model": &report.model,
            "chart": ChartData::from_tweets(&report.tweets),
            "tweets": &report.tweets,
            "skipped": &report.skipped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", ChartData::from_tweets(&report.tweets).render());
    println!();
    rotate(Some(report.tweets), display, args).await;
    Ok(())
}

async fn rotate(tweets: Option<ClassifiedTweets>, display: &DisplayConfig, args: &DisplayArgs) {
    let mut rotation = TweetRotation::new(tweets);
    rotation.select(args.select);

    // interval() panics on a zero period
    let mut ticker = tokio::time::interval(display.interval().max(Duration::from_millis(1)));
    for _ in 0..display.rotations {
        tokio::select! {
            _ = ticker.tick() => println!("{}", rotation.next_display().render()),
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}
