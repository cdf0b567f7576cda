use serde::{Deserialize, Serialize};

/// A single scraped listing
///
/// All three fields are required. Sources never emit a partially populated
/// item; markup missing any of them is skipped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    /// Display title, also the deduplication key (exact, case-sensitive)
    pub title: String,

    /// Absolute URL of the cover or thumbnail image
    pub image: String,

    /// Absolute URL of the listing page on the source site
    pub link: String,
}

impl ListingItem {
    /// Creates a new listing item
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            link: link.into(),
        }
    }

    /// Builds an item only if every field is present and non-blank
    ///
    /// Title whitespace is trimmed. Returns `None` when any part is missing,
    /// which is how sources drop half-rendered cards.
    pub fn from_parts(
        title: Option<String>,
        image: Option<String>,
        link: Option<String>,
    ) -> Option<Self> {
        let title = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
        let image = image.filter(|i| !i.trim().is_empty())?;
        let link = link.filter(|l| !l.trim().is_empty())?;

        Some(Self { title, image, link })
    }
}
