//! Output module for delivering an aggregated feed
//!
//! The feed is serialized as a JSON array of `{title, image, link}` objects,
//! the shape the delivery endpoint returns to its callers.

mod json;

pub use json::{feed_to_json, write_feed_json};
