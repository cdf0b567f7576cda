//! Otaku-Feed main entry point
//!
//! This is the command-line front end: it aggregates one domain and prints
//! the feed as JSON, the same body the delivery endpoint would return.

use anyhow::Context;
use clap::Parser;
use otaku_feed::config::{load_config_with_hash, Config};
use otaku_feed::listing::Domain;
use otaku_feed::output::write_feed_json;
use otaku_feed::Aggregator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Otaku-Feed: a manga and anime listing aggregator
///
/// Scrapes every configured source for the chosen domain concurrently,
/// merges the results, drops repeated titles and prints a JSON array of
/// `{title, image, link}` objects.
#[derive(Parser, Debug)]
#[command(name = "otaku-feed")]
#[command(version)]
#[command(about = "A manga and anime listing aggregator", long_about = None)]
struct Cli {
    /// Domain to aggregate (manga or anime)
    #[arg(value_name = "DOMAIN")]
    domain: Domain,

    /// Path to TOML configuration file (built-in sources when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// List the sources registered for the domain and exit
    #[arg(long)]
    list_sources: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration given, using built-in sources");
            Config::default()
        }
    };

    if cli.list_sources {
        handle_list_sources(&config, cli.domain);
        return Ok(());
    }

    handle_aggregate(&config, cli.domain, cli.pretty).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the feed.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("otaku_feed=info,warn"),
            1 => EnvFilter::new("otaku_feed=debug,info"),
            2 => EnvFilter::new("otaku_feed=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --list-sources: prints the sources registered for a domain
fn handle_list_sources(config: &Config, domain: Domain) {
    println!("Sources for {}:", domain);
    for source in config.sources_for(domain) {
        println!("  - {} ({})", source.name, source.url);
        println!("    container: {}", source.container);
        println!("    title: {}", source.title);
    }

    println!("\nFetcher:");
    println!("  Max attempts: {}", config.fetcher.max_attempts);
    println!("  Base delay: {}ms", config.fetcher.base_delay_ms);
    println!(
        "  Max concurrent requests: {}",
        config.fetcher.max_concurrent_requests
    );
    println!("  Source timeout: {}s", config.fetcher.adapter_timeout_secs);
}

/// Aggregates the domain and writes the feed to stdout
async fn handle_aggregate(config: &Config, domain: Domain, pretty: bool) -> anyhow::Result<()> {
    let aggregator = Aggregator::from_config(config).context("failed to build aggregator")?;

    let (feed, report) = aggregator.aggregate_with_report(domain).await;

    for source in &report.sources {
        if source.outcome.is_abandoned() {
            tracing::warn!(
                "{}: {} after {:?}, contributed nothing",
                source.name,
                source.outcome,
                source.elapsed
            );
        } else {
            tracing::debug!("{}: {} in {:?}", source.name, source.outcome, source.elapsed);
        }
    }

    let stdout = std::io::stdout();
    write_feed_json(&feed, stdout.lock(), pretty).context("failed to write feed")?;

    Ok(())
}
