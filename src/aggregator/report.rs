use crate::listing::Domain;
use std::fmt;
use std::time::Duration;

/// How a single source settled during one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source returned this many items (zero covers internal failures)
    Items(usize),

    /// The source exceeded the per-source timeout and contributed nothing
    TimedOut,

    /// The source's task panicked and contributed nothing
    Panicked,
}

impl SourceOutcome {
    /// Number of items the source contributed before deduplication
    pub fn item_count(&self) -> usize {
        match self {
            Self::Items(n) => *n,
            Self::TimedOut | Self::Panicked => 0,
        }
    }

    /// Returns true if the source was cut off or crashed
    pub fn is_abandoned(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Panicked)
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(n) => write!(f, "{} items", n),
            Self::TimedOut => write!(f, "timed out"),
            Self::Panicked => write!(f, "panicked"),
        }
    }
}

/// Per-source line of an aggregation report
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub name: String,
    pub outcome: SourceOutcome,
    pub elapsed: Duration,
}

/// Summary of one aggregation run, sources in registration order
#[derive(Debug, Clone)]
pub struct AggregationReport {
    pub domain: Domain,
    pub sources: Vec<SourceReport>,

    /// Items before deduplication
    pub items_collected: usize,

    /// Items removed as repeated titles
    pub duplicates_removed: usize,
}

impl AggregationReport {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            sources: Vec::new(),
            items_collected: 0,
            duplicates_removed: 0,
        }
    }

    /// Items in the final feed
    pub fn feed_len(&self) -> usize {
        self.items_collected - self.duplicates_removed
    }

    /// Sources that contributed at least one item
    pub fn contributing_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.outcome.item_count() > 0)
            .count()
    }

    /// Looks up a source by name
    pub fn source(&self, name: &str) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.name == name)
    }
}
