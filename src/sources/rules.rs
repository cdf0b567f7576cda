use crate::config::SourceEntry;
use crate::FeedError;
use scraper::Selector;

/// Per-site selectors describing where listing cards and their fields live
///
/// Selectors are kept as text and compiled on each extraction, so a bad
/// selector surfaces as that source's failure rather than at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRules {
    /// Selector matching one element per listing card
    pub container: String,

    /// Title element, relative to the card
    pub title: String,

    /// Image element, relative to the card
    pub image: String,

    /// Anchor element, relative to the card
    pub link: String,

    /// Image attributes to try in order (lazy-loading sites use `data-src`)
    pub image_attributes: Vec<String>,
}

impl ExtractionRules {
    /// Rules using `img` for images and `a` for links
    pub fn new(container: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            title: title.into(),
            image: "img".to_string(),
            link: "a".to_string(),
            image_attributes: crate::config::default_image_attributes(),
        }
    }

    /// Compiles every selector
    pub fn compile(&self) -> Result<CompiledRules, FeedError> {
        Ok(CompiledRules {
            container: compile_selector(&self.container)?,
            title: compile_selector(&self.title)?,
            image: compile_selector(&self.image)?,
            link: compile_selector(&self.link)?,
        })
    }
}

impl From<&SourceEntry> for ExtractionRules {
    fn from(entry: &SourceEntry) -> Self {
        Self {
            container: entry.container.clone(),
            title: entry.title.clone(),
            image: entry.image.clone(),
            link: entry.link.clone(),
            image_attributes: entry.image_attributes.clone(),
        }
    }
}

/// Selectors ready for matching
#[derive(Debug)]
pub struct CompiledRules {
    pub container: Selector,
    pub title: Selector,
    pub image: Selector,
    pub link: Selector,
}

fn compile_selector(selector: &str) -> Result<Selector, FeedError> {
    Selector::parse(selector).map_err(|e| FeedError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
