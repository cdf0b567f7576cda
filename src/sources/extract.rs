//! HTML extraction of listing cards
//!
//! This module turns a source page into listing items:
//! - Selecting one element per card with the source's container selector
//! - Reading title, image and link inside each card
//! - Resolving relative URLs against the source's base URL
//! - Dropping cards with any field missing

use crate::listing::ListingItem;
use crate::sources::rules::{CompiledRules, ExtractionRules};
use crate::FeedError;
use scraper::{ElementRef, Html};
use url::Url;

/// Extracts every fully populated listing card from an HTML page
///
/// A page where the container selector matches nothing yields an empty list,
/// not an error. Only invalid selectors fail.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `rules` - The source's selectors
/// * `base_url` - The base URL for resolving relative links and images
///
/// # Example
///
/// ```
/// use otaku_feed::sources::{extract_items, ExtractionRules};
/// use url::Url;
///
/// let html = r#"<div class="card"><a href="/title/1"><img src="/c/1.jpg"></a>
///               <h3 class="card-title">One Piece</h3></div>"#;
/// let base = Url::parse("https://mangadex.org").unwrap();
/// let rules = ExtractionRules::new(".card", ".card-title");
///
/// let items = extract_items(html, &rules, &base).unwrap();
/// assert_eq!(items[0].link, "https://mangadex.org/title/1");
/// ```
pub fn extract_items(
    html: &str,
    rules: &ExtractionRules,
    base_url: &Url,
) -> Result<Vec<ListingItem>, FeedError> {
    let compiled = rules.compile()?;
    let document = Html::parse_document(html);

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for card in document.select(&compiled.container) {
        match extract_card(card, &compiled, rules, base_url) {
            Some(item) => items.push(item),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::trace!("Skipped {} incomplete cards", skipped);
    }

    Ok(items)
}

/// Reads one card, returning `None` if any field is missing
fn extract_card(
    card: ElementRef<'_>,
    compiled: &CompiledRules,
    rules: &ExtractionRules,
    base_url: &Url,
) -> Option<ListingItem> {
    let title = card
        .select(&compiled.title)
        .next()
        .map(|element| normalize_text(element.text()));

    let image = card.select(&compiled.image).next().and_then(|element| {
        rules
            .image_attributes
            .iter()
            .filter_map(|attr| element.value().attr(attr))
            .find_map(|value| resolve_url(value, base_url))
    });

    let link = card
        .select(&compiled.link)
        .filter_map(|element| element.value().attr("href"))
        .find_map(|href| resolve_url(href, base_url));

    ListingItem::from_parts(title, image, link)
}

/// Joins text nodes and collapses runs of whitespace
fn normalize_text<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves an href or src to an absolute URL
///
/// Returns None if the value should be ignored:
/// - empty values
/// - javascript:, mailto:, tel: schemes
/// - data: URIs (lazy-load placeholders)
/// - fragment-only links
/// - anything that is not HTTP(S) after resolution
pub fn resolve_url(value: &str, base_url: &Url) -> Option<String> {
    let value = value.trim();

    if value.is_empty() || value.starts_with('#') {
        return None;
    }

    if value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with("tel:")
        || value.starts_with("data:")
    {
        return None;
    }

    match base_url.join(value) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
