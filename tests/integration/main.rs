//! Integration tests for otaku-feed
//!
//! These tests use wiremock to stand in for the external sites and run the
//! fetcher, sources and aggregator end-to-end.

mod common;
mod feed_tests;
mod fetcher_tests;
