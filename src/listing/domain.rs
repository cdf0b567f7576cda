//! Listing domain definitions
//!
//! Each source belongs to exactly one domain and aggregation always runs
//! over a single domain at a time.

use crate::FeedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The family of sites a source scrapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Manga series listings
    Manga,

    /// Anime title listings
    Anime,
}

impl Domain {
    /// Returns the lowercase name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manga => "manga",
            Self::Anime => "anime",
        }
    }

    /// Returns all known domains
    pub fn all() -> Vec<Self> {
        vec![Self::Manga, Self::Anime]
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manga" => Ok(Self::Manga),
            "anime" => Ok(Self::Anime),
            _ => Err(FeedError::UnknownDomain(s.to_string())),
        }
    }
}
