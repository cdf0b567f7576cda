use otaku_feed::listing::Domain;
use otaku_feed::sources::{ExtractionRules, HtmlSource, SourceAdapter};
use otaku_feed::{ResilientFetcher, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fetcher with a short backoff so retry tests stay fast
pub fn test_fetcher(max_attempts: u32, max_concurrent: usize) -> Arc<ResilientFetcher> {
    Arc::new(ResilientFetcher::new(
        reqwest::Client::new(),
        RetryPolicy::new(max_attempts, Duration::from_millis(10)),
        max_concurrent,
    ))
}

/// Like `test_fetcher`, but every attempt gives up after `request_timeout`
pub fn timed_fetcher(max_attempts: u32, request_timeout: Duration) -> Arc<ResilientFetcher> {
    let client = reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .expect("client builds");

    Arc::new(ResilientFetcher::new(
        client,
        RetryPolicy::new(max_attempts, Duration::from_millis(10)),
        5,
    ))
}

/// Renders listing cards in the `.card` / `.card-title` shape
pub fn cards_html(titles: &[&str]) -> String {
    let cards: String = titles
        .iter()
        .map(|title| {
            let slug = title.to_lowercase().replace(' ', "-");
            format!(
                r#"<div class="card"><a href="/title/{slug}"><img src="/covers/{slug}.jpg"></a><h3 class="card-title">{title}</h3></div>"#
            )
        })
        .collect();

    format!("<html><body>{}</body></html>", cards)
}

/// Mounts an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html")
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// A `.card` source reading `route` on the mock server
pub fn card_source(
    name: &str,
    server: &MockServer,
    route: &str,
    fetcher: Arc<ResilientFetcher>,
) -> Arc<dyn SourceAdapter> {
    let source = HtmlSource::new(
        name,
        Domain::Manga,
        format!("{}{}", server.uri(), route),
        &server.uri(),
        ExtractionRules::new(".card", ".card-title"),
        fetcher,
    )
    .expect("valid source");

    Arc::new(source)
}
