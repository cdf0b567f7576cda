//! Resilient HTTP fetcher shared by all sources
//!
//! This module wraps outbound requests with:
//! - Bounded retry with linear backoff
//! - A per-fetcher cap on simultaneous in-flight requests
//! - Error classification (transport, timeout, HTTP status)

mod client;
mod gate;
mod retry;

pub use client::{build_http_client, user_agent_string};
pub use gate::ConcurrencyGate;
pub use retry::{retry_with_backoff, RetryPolicy};

use crate::config::Config;
use crate::FeedError;
use reqwest::Client;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// HTTP fetcher with retry and a concurrency cap
///
/// One instance is shared (behind an `Arc`) by every source of an aggregator.
/// A slot in the gate is held for the duration of a single attempt, request
/// and body read included, and released before any backoff sleep.
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: Client,
    gate: ConcurrencyGate,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    /// Creates a fetcher from an existing client
    pub fn new(client: Client, policy: RetryPolicy, max_concurrent: usize) -> Self {
        Self {
            client,
            gate: ConcurrencyGate::new(max_concurrent),
            policy,
        }
    }

    /// Builds the client and fetcher described by the configuration
    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        let client = build_http_client(&config.user_agent, config.fetcher.request_timeout())?;

        Ok(Self::new(
            client,
            config.fetcher.retry_policy(),
            config.fetcher.max_concurrent_requests as usize,
        ))
    }

    /// The default retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The concurrency gate
    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// Number of requests currently in flight
    pub fn in_flight(&self) -> usize {
        self.gate.in_flight()
    }

    /// Fetches a URL using the fetcher's default attempt budget
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FeedError> {
        self.fetch_with_retry(url, self.policy.max_attempts).await
    }

    /// Fetches a URL, retrying failed attempts with linear backoff
    ///
    /// An attempt fails on a transport error, a non-2xx status, or a body
    /// read error. The error of the final attempt is returned once
    /// `max_attempts` attempts have failed.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    /// * `max_attempts` - Total attempts, including the first
    pub async fn fetch_with_retry(
        &self,
        url: &str,
        max_attempts: u32,
    ) -> Result<FetchedPage, FeedError> {
        let policy = self.policy.with_max_attempts(max_attempts);
        retry_with_backoff(&policy, url, |_| self.fetch_once(url)).await
    }

    /// Makes a single attempt while holding a gate slot
    async fn fetch_once(&self, url: &str) -> Result<FetchedPage, FeedError> {
        let _permit = self.gate.acquire().await;

        tracing::trace!("GET {} ({} in flight)", url, self.gate.in_flight());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Maps a reqwest error onto the feed error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FeedError {
    if error.is_timeout() {
        FeedError::Timeout {
            url: url.to_string(),
        }
    } else {
        FeedError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
