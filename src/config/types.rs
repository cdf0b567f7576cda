use crate::fetcher::RetryPolicy;
use crate::listing::Domain;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Otaku-Feed
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(rename = "source", default)]
    pub sources: Vec<SourceEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            user_agent: UserAgentConfig::default(),
            sources: crate::sources::builtin_sources(),
        }
    }
}

impl Config {
    /// Returns the configured sources for one domain, in registration order
    pub fn sources_for(&self, domain: Domain) -> impl Iterator<Item = &SourceEntry> {
        self.sources.iter().filter(move |s| s.domain == domain)
    }
}

/// Outbound request behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Total attempts per request, including the first one
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Linear backoff unit; attempt `n` waits `n * base-delay-ms` (milliseconds)
    #[serde(rename = "base-delay-ms", default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Maximum number of requests in flight across all sources
    #[serde(
        rename = "max-concurrent-requests",
        default = "default_max_concurrent_requests"
    )]
    pub max_concurrent_requests: u32,

    /// Timeout for a single HTTP request (seconds)
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Overall budget for one source, retries included (seconds)
    #[serde(
        rename = "adapter-timeout-secs",
        default = "default_adapter_timeout_secs"
    )]
    pub adapter_timeout_secs: u64,
}

impl FetcherConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_secs(self.adapter_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.base_delay())
    }

    /// Time one request may take when every attempt runs into the request timeout
    pub fn retry_budget(&self) -> Duration {
        self.retry_policy().worst_case(self.request_timeout())
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_secs: default_request_timeout_secs(),
            adapter_timeout_secs: default_adapter_timeout_secs(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_concurrent_requests() -> u32 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_adapter_timeout_secs() -> u64 {
    crate::aggregator::DEFAULT_ADAPTER_TIMEOUT.as_secs()
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Client name sent in the User-Agent header
    pub name: String,

    /// Client version
    pub version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/otaku-feed".to_string(),
        }
    }
}

/// One scraped site and the selectors used to read its listing cards
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Unique source name, used in logs and reports
    pub name: String,

    /// Domain this source contributes to
    pub domain: Domain,

    /// Page to fetch
    pub url: String,

    /// Base for resolving relative links (defaults to `url`)
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Selector for each listing card
    pub container: String,

    /// Selector for the title element, relative to the card
    pub title: String,

    /// Selector for the image element, relative to the card
    pub image: String,

    /// Selector for the anchor element, relative to the card
    pub link: String,

    /// Image attributes to try in order
    #[serde(rename = "image-attributes", default = "default_image_attributes")]
    pub image_attributes: Vec<String>,
}

impl SourceEntry {
    /// Returns the base URL, falling back to the page URL
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(&self.url)
    }
}

pub(crate) fn default_image_attributes() -> Vec<String> {
    vec!["src".to_string(), "data-src".to_string()]
}
