//! Configuration module for Otaku-Feed
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional: a missing `[fetcher]` or `[user-agent]` table uses
//! defaults and a file without `[[source]]` entries uses the built-in sources.
//!
//! # Example
//!
//! ```no_run
//! use otaku_feed::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("otaku-feed.toml")).unwrap();
//! println!("Max attempts: {}", config.fetcher.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, SourceEntry, UserAgentConfig};
pub(crate) use types::default_image_attributes;

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
