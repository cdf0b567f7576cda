use crate::config::SourceEntry;
use crate::fetcher::ResilientFetcher;
use crate::listing::{Domain, SourceResult};
use crate::sources::extract::extract_items;
use crate::sources::rules::ExtractionRules;
use crate::sources::SourceAdapter;
use crate::FeedError;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// A source that scrapes listing cards from one HTML page
///
/// Every site is an instance of this type with its own URL and selectors;
/// adding a site means adding an instance, not changing this code.
#[derive(Debug, Clone)]
pub struct HtmlSource {
    name: String,
    domain: Domain,
    url: String,
    base_url: Url,
    rules: ExtractionRules,
    fetcher: Arc<ResilientFetcher>,
}

impl HtmlSource {
    /// Creates a new HTML source
    ///
    /// # Arguments
    ///
    /// * `name` - Source name for logs and reports
    /// * `domain` - Domain the source contributes to
    /// * `url` - Page to fetch
    /// * `base_url` - Base for resolving relative links
    /// * `rules` - Card and field selectors
    /// * `fetcher` - Shared fetcher
    ///
    /// # Returns
    ///
    /// * `Ok(HtmlSource)` - The configured source
    /// * `Err(FeedError)` - The base URL does not parse
    pub fn new(
        name: impl Into<String>,
        domain: Domain,
        url: impl Into<String>,
        base_url: &str,
        rules: ExtractionRules,
        fetcher: Arc<ResilientFetcher>,
    ) -> Result<Self, FeedError> {
        Ok(Self {
            name: name.into(),
            domain,
            url: url.into(),
            base_url: Url::parse(base_url)?,
            rules,
            fetcher,
        })
    }

    /// Builds a source from a configuration entry
    pub fn from_entry(
        entry: &SourceEntry,
        fetcher: Arc<ResilientFetcher>,
    ) -> Result<Self, FeedError> {
        Self::new(
            entry.name.clone(),
            entry.domain,
            entry.url.clone(),
            entry.effective_base_url(),
            ExtractionRules::from(entry),
            fetcher,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Fetches and extracts the page, surfacing any failure
    pub async fn try_fetch(&self) -> Result<SourceResult, FeedError> {
        let page = self.fetcher.fetch(&self.url).await?;
        let items = extract_items(&page.body, &self.rules, &self.base_url)?;

        if items.is_empty() {
            tracing::debug!(
                "{}: no listing cards matched '{}' at {}",
                self.name,
                self.rules.container,
                page.final_url
            );
        }

        Ok(items)
    }
}

#[async_trait]
impl SourceAdapter for HtmlSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn domain(&self) -> Domain {
        self.domain
    }

    async fn fetch(&self) -> SourceResult {
        match self.try_fetch().await {
            Ok(items) => {
                tracing::debug!("{}: extracted {} items", self.name, items.len());
                items
            }
            Err(e) => {
                tracing::error!("Error fetching listings from {}: {}", self.name, e);
                Vec::new()
            }
        }
    }
}
