//! Aggregator - concurrent fan-out over every source of a domain
//!
//! This module runs all sources registered for a domain at the same time,
//! waits for each of them to settle, and merges their results:
//! - Each source runs in its own task with its own timeout
//! - A source that times out or panics contributes an empty result
//! - Results are concatenated in registration order, never completion order
//! - Repeated titles are removed, first source wins

mod report;

pub use report::{AggregationReport, SourceOutcome, SourceReport};

use crate::config::Config;
use crate::fetcher::ResilientFetcher;
use crate::listing::{dedupe, AggregatedFeed, Domain, SourceResult};
use crate::sources::{HtmlSource, SourceAdapter};
use crate::FeedError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default overall budget for one source, retries included
pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(120);

/// Fans out to registered sources and merges their listings
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    adapter_timeout: Duration,
}

impl Aggregator {
    /// Creates an aggregator over the given sources
    ///
    /// # Arguments
    ///
    /// * `adapters` - Sources in registration order
    /// * `adapter_timeout` - Per-source budget; a source still running when
    ///   it expires is treated as having returned nothing
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, adapter_timeout: Duration) -> Self {
        Self {
            adapters,
            adapter_timeout,
        }
    }

    /// Builds one shared fetcher and an HTML source per configured entry
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let fetcher = Arc::new(ResilientFetcher::from_config(config)?);

        let adapters = config
            .sources
            .iter()
            .map(|entry| {
                HtmlSource::from_entry(entry, Arc::clone(&fetcher))
                    .map(|source| Arc::new(source) as Arc<dyn SourceAdapter>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(adapters, config.fetcher.adapter_timeout()))
    }

    /// Appends a source after the existing ones
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn adapter_timeout(&self) -> Duration {
        self.adapter_timeout
    }

    /// Sources registered for a domain, in registration order
    pub fn sources_for(&self, domain: Domain) -> Vec<Arc<dyn SourceAdapter>> {
        self.adapters
            .iter()
            .filter(|adapter| adapter.domain() == domain)
            .cloned()
            .collect()
    }

    /// Returns the deduplicated feed for a domain
    ///
    /// Never fails: sources that fail, time out or panic only shrink the feed.
    pub async fn aggregate_all(&self, domain: Domain) -> AggregatedFeed {
        self.aggregate_with_report(domain).await.0
    }

    /// Returns the deduplicated feed together with a per-source report
    pub async fn aggregate_with_report(
        &self,
        domain: Domain,
    ) -> (AggregatedFeed, AggregationReport) {
        let adapters = self.sources_for(domain);
        let mut report = AggregationReport::new(domain);

        if adapters.is_empty() {
            tracing::warn!("No sources registered for domain {}", domain);
            return (Vec::new(), report);
        }

        let started = Instant::now();
        let handles = adapters
            .iter()
            .map(|adapter| tokio::spawn(run_source(Arc::clone(adapter), self.adapter_timeout)));

        let settled = join_all(handles).await;

        let mut combined: SourceResult = Vec::new();
        for (adapter, result) in adapters.iter().zip(settled) {
            let (outcome, elapsed, items) = match result {
                Ok(run) => run,
                Err(e) => {
                    tracing::error!("Source {} task failed: {}", adapter.name(), e);
                    (SourceOutcome::Panicked, started.elapsed(), Vec::new())
                }
            };

            report.sources.push(SourceReport {
                name: adapter.name().to_string(),
                outcome,
                elapsed,
            });
            combined.extend(items);
        }

        report.items_collected = combined.len();
        let feed = dedupe(combined);
        report.duplicates_removed = report.items_collected - feed.len();

        tracing::info!(
            "Aggregated {} {} listings from {}/{} sources ({} duplicates removed) in {:?}",
            report.feed_len(),
            domain,
            report.contributing_sources(),
            report.sources.len(),
            report.duplicates_removed,
            started.elapsed()
        );

        (feed, report)
    }
}

/// Runs one source under its timeout
async fn run_source(
    adapter: Arc<dyn SourceAdapter>,
    timeout: Duration,
) -> (SourceOutcome, Duration, SourceResult) {
    let started = Instant::now();

    match tokio::time::timeout(timeout, adapter.fetch()).await {
        Ok(items) => (SourceOutcome::Items(items.len()), started.elapsed(), items),
        Err(_) => {
            tracing::warn!(
                "Source {} did not settle within {:?}; using no items",
                adapter.name(),
                timeout
            );
            (SourceOutcome::TimedOut, started.elapsed(), Vec::new())
        }
    }
}
