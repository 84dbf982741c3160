//! TweetSense
//!
//! Searches tweets for a term, classifies their sentiment and shows a chart
//! plus a rotating line of example tweets.

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tweetsense_classifiers::{ClassifierRegistry, SentimentPipeline};
use tweetsense_cli::app::{self, cancellable};
use tweetsense_cli::{AppConfig, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    info!("Configuration loaded");

    // one classifier handle for the whole session
    let registry = ClassifierRegistry::new(config.classifiers.clone());

    let outcome = match cli.command {
        Commands::Search {
            term,
            lang,
            count,
            base_url,
            api_key,
            api_secret,
            bearer_token,
            classify,
            display,
        } => {
            config.apply_classify_args(&classify);
            config.apply_display_args(&display);
            let search = &mut config.search;
            if let Some(lang) = lang {
                search.lang = lang;
            }
            if let Some(count) = count {
                search.count = count;
            }
            if let Some(base_url) = base_url {
                search.base_url = base_url;
            }
            search.api_key = api_key.or(search.api_key.take());
            search.api_secret = api_secret.or(search.api_secret.take());
            search.bearer_token = bearer_token.or(search.bearer_token.take());

            let query = app::reported(app::build_query(&term, &config.search))?;
            let client = app::reported(app::build_search_client(&config.search))?;
            let pipeline = app::reported(app::build_pipeline(&config, &registry))?;

            let step = app::search_and_classify(&client, &pipeline, &query, config.search.timeout());
            run(step, &config, &display).await
        }

        Commands::Classify {
            input,
            classify,
            display,
        } => {
            config.apply_classify_args(&classify);
            config.apply_display_args(&display);

            let texts = app::reported(read_texts(input.as_deref()))?;
            info!(texts = texts.len(), "Read input texts");
            let pipeline: SentimentPipeline = app::reported(app::build_pipeline(&config, &registry))?;

            run(pipeline.classify(&texts), &config, &display).await
        }
    };

    registry.unload_all();
    outcome
}

async fn run(
    step: impl std::future::Future<Output = tweetsense_core::Result<tweetsense_classifiers::ClassificationReport>>,
    config: &AppConfig,
    display: &tweetsense_cli::DisplayArgs,
) -> anyhow::Result<()> {
    match cancellable(step).await {
        Some(Ok(report)) => app::present(report, &config.display, display).await,
        Some(Err(e)) => {
            app::report_failure(&e);
            Err(e.into())
        }
        None => {
            warn!("Cancelled");
            Ok(())
        }
    }
}

/// One text per non-blank line, from a file or stdin
fn read_texts(input: Option<&Path>) -> tweetsense_core::Result<Vec<String>> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(app::split_texts(&content))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tweetsense=debug,tweetsense_cli=debug,tweetsense_classifiers=debug,tweetsense_search=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("tweetsense=info,tweetsense_cli=info,tweetsense_classifiers=warn,tweetsense_search=warn")
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
