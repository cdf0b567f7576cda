//! Source adapters for the external manga and anime sites
//!
//! Every site is isolated behind the `SourceAdapter` contract: fetch never
//! fails, and anything that goes wrong inside a source (network, status,
//! markup) is logged and turned into an empty result.

mod adapter;
mod builtin;
mod extract;
mod rules;

pub use adapter::HtmlSource;
pub use builtin::builtin_sources;
pub use extract::{extract_items, resolve_url};
pub use rules::{CompiledRules, ExtractionRules};

use crate::listing::{Domain, SourceResult};
use async_trait::async_trait;

/// One external site that produces listings
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Source name, unique within an aggregator
    fn name(&self) -> &str;

    /// Domain the source contributes to
    fn domain(&self) -> Domain;

    /// Fetches the current listings
    ///
    /// Never fails: implementations log their own errors and return an
    /// empty list instead.
    async fn fetch(&self) -> SourceResult;
}
