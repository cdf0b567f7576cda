//! Otaku-Feed: a manga and anime listing aggregator
//!
//! This crate scrapes listings from several external manga/anime sites
//! concurrently, normalizes their markup into one record shape, and merges
//! the results into a single deduplicated feed. A failing or slow site only
//! shrinks the feed, it never fails the request.

pub mod aggregator;
pub mod config;
pub mod fetcher;
pub mod listing;
pub mod output;
pub mod sources;

use thiserror::Error;

/// Main error type for Otaku-Feed operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Otaku-Feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregator::{AggregationReport, Aggregator, SourceOutcome};
pub use config::Config;
pub use fetcher::{FetchedPage, ResilientFetcher, RetryPolicy};
pub use listing::{dedupe, AggregatedFeed, Domain, ListingItem, SourceResult};
pub use sources::{ExtractionRules, HtmlSource, SourceAdapter};
