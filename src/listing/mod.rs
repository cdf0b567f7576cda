//! Listing module for the unified feed record shape
//!
//! # Components
//!
//! - `ListingItem`: one scraped entry (a manga series or anime title)
//! - `Domain`: which family of sources a listing belongs to
//! - `dedupe`: stable, first-seen-wins removal of repeated titles

mod dedupe;
mod domain;
mod item;

// Re-export main types
pub use dedupe::dedupe;
pub use domain::Domain;
pub use item::ListingItem;

/// The ordered items produced by one adapter invocation
pub type SourceResult = Vec<ListingItem>;

/// The deduplicated concatenation of every source result for a domain
pub type AggregatedFeed = Vec<ListingItem>;
