use crate::config::{default_image_attributes, SourceEntry};
use crate::listing::Domain;

/// (name, domain, page url, base url, container, title)
const BUILTIN: &[(&str, Domain, &str, &str, &str, &str)] = &[
    (
        "mangadex",
        Domain::Manga,
        "https://mangadex.org/",
        "https://mangadex.org",
        ".card",
        ".card-title",
    ),
    (
        "mangapark",
        Domain::Manga,
        "https://mangapark.net/",
        "https://mangapark.net",
        ".manga_item",
        ".manga-title",
    ),
    (
        "animepahe",
        Domain::Anime,
        "https://animepahe.ru",
        "https://animepahe.ru",
        ".last_episodes li",
        ".name",
    ),
    (
        "kissanime",
        Domain::Anime,
        "https://kissanime.ba",
        "https://kissanime.ba",
        ".anime_item",
        ".name",
    ),
];

/// Sources used when the configuration lists none, in registration order
pub fn builtin_sources() -> Vec<SourceEntry> {
    BUILTIN
        .iter()
        .map(|&(name, domain, url, base_url, container, title)| SourceEntry {
            name: name.to_string(),
            domain,
            url: url.to_string(),
            base_url: Some(base_url.to_string()),
            container: container.to_string(),
            title: title.to_string(),
            image: "img".to_string(),
            link: "a".to_string(),
            image_attributes: default_image_attributes(),
        })
        .collect()
}
