//! Title-based deduplication

use crate::listing::ListingItem;
use std::collections::HashSet;

/// Removes later items whose title has already been seen
///
/// The first occurrence of each title wins and keeps its own image and link.
/// Relative order of the surviving items is preserved. Matching is exact and
/// case-sensitive; "Naruto" and "naruto" are distinct titles.
///
/// # Example
///
/// ```
/// use otaku_feed::listing::{dedupe, ListingItem};
///
/// let items = vec![
///     ListingItem::new("Naruto", "https://a/n.jpg", "https://a/n"),
///     ListingItem::new("Naruto", "https://b/n.jpg", "https://b/n"),
/// ];
/// let unique = dedupe(items);
/// assert_eq!(unique.len(), 1);
/// assert_eq!(unique[0].link, "https://a/n");
/// ```
pub fn dedupe(items: Vec<ListingItem>) -> Vec<ListingItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());

    items
        .into_iter()
        .filter(|item| seen.insert(item.title.clone()))
        .collect()
}
