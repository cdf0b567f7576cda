use crate::common::{card_source, cards_html, mount_page, test_fetcher, timed_fetcher};
use otaku_feed::config::parse_config;
use otaku_feed::listing::Domain;
use otaku_feed::{Aggregator, SourceAdapter, SourceOutcome};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn titles(feed: &[otaku_feed::ListingItem]) -> Vec<&str> {
    feed.iter().map(|i| i.title.as_str()).collect()
}

#[tokio::test]
async fn test_two_sources_merged_and_deduplicated() {
    let server = MockServer::start().await;
    mount_page(&server, "/x", cards_html(&["One Piece", "Naruto"]), Duration::ZERO).await;
    mount_page(&server, "/y", cards_html(&["Naruto", "Bleach"]), Duration::ZERO).await;

    let fetcher = test_fetcher(1, 5);
    let aggregator = Aggregator::new(
        vec![
            card_source("x", &server, "/x", fetcher.clone()),
            card_source("y", &server, "/y", fetcher),
        ],
        Duration::from_secs(5),
    );

    let (feed, report) = aggregator.aggregate_with_report(Domain::Manga).await;

    assert_eq!(titles(&feed), vec!["One Piece", "Naruto", "Bleach"]);
    assert_eq!(feed[1].link, format!("{}/title/naruto", server.uri()));
    assert_eq!(feed[0].image, format!("{}/covers/one-piece.jpg", server.uri()));
    assert_eq!(report.duplicates_removed, 1);
}

#[tokio::test]
async fn test_failing_source_does_not_fail_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_page(&server, "/up", cards_html(&["Bleach"]), Duration::ZERO).await;

    let fetcher = test_fetcher(2, 5);
    let aggregator = Aggregator::new(
        vec![
            card_source("down", &server, "/down", fetcher.clone()),
            card_source("up", &server, "/up", fetcher),
        ],
        Duration::from_secs(5),
    );

    let (feed, report) = aggregator.aggregate_with_report(Domain::Manga).await;

    assert_eq!(titles(&feed), vec!["Bleach"]);
    assert_eq!(report.source("down").unwrap().outcome, SourceOutcome::Items(0));
}

#[tokio::test]
async fn test_slow_first_source_still_first() {
    let server = MockServer::start().await;
    mount_page(&server, "/slow", cards_html(&["Slow Title"]), Duration::from_millis(300)).await;
    mount_page(&server, "/fast", cards_html(&["Fast Title"]), Duration::ZERO).await;

    let fetcher = test_fetcher(1, 5);
    let aggregator = Aggregator::new(
        vec![
            card_source("slow", &server, "/slow", fetcher.clone()),
            card_source("fast", &server, "/fast", fetcher),
        ],
        Duration::from_secs(5),
    );

    let feed = aggregator.aggregate_all(Domain::Manga).await;
    assert_eq!(titles(&feed), vec!["Slow Title", "Fast Title"]);
}

#[tokio::test]
async fn test_unresponsive_source_times_out() {
    let server = MockServer::start().await;
    mount_page(&server, "/hang", cards_html(&["Never"]), Duration::from_secs(10)).await;
    mount_page(&server, "/ok", cards_html(&["Here"]), Duration::ZERO).await;

    let fetcher = test_fetcher(1, 5);
    let aggregator = Aggregator::new(
        vec![
            card_source("hang", &server, "/hang", fetcher.clone()),
            card_source("ok", &server, "/ok", fetcher.clone()),
        ],
        Duration::from_millis(300),
    );

    let started = std::time::Instant::now();
    let (feed, report) = aggregator.aggregate_with_report(Domain::Manga).await;

    assert_eq!(titles(&feed), vec!["Here"]);
    assert_eq!(report.source("hang").unwrap().outcome, SourceOutcome::TimedOut);
    assert!(started.elapsed() < Duration::from_secs(5));
    // The abandoned request released its slot
    assert_eq!(fetcher.in_flight(), 0);
}

#[tokio::test]
async fn test_hanging_source_gets_every_attempt() {
    let server = MockServer::start().await;
    mount_page(&server, "/hang", cards_html(&["Lost"]), Duration::from_secs(5)).await;

    let request_timeout = Duration::from_millis(300);
    let fetcher = timed_fetcher(3, request_timeout);
    let budget = fetcher.policy().worst_case(request_timeout);
    let aggregator = Aggregator::new(
        vec![card_source("hang", &server, "/hang", fetcher)],
        budget + Duration::from_millis(500),
    );

    let (feed, report) = aggregator.aggregate_with_report(Domain::Manga).await;

    assert!(feed.is_empty());
    // The source settled on its own after its last attempt, not by being cut off
    assert_eq!(report.source("hang").unwrap().outcome, SourceOutcome::Items(0));
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_changed_markup_yields_empty_source() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/redesign",
        "<html><body><article class=\"tile\">One Piece</article></body></html>".to_string(),
        Duration::ZERO,
    )
    .await;

    let source = card_source("redesign", &server, "/redesign", test_fetcher(1, 5));
    assert!(source.fetch().await.is_empty());
}

#[tokio::test]
async fn test_configured_sources_end_to_end() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/latest",
        r#"<ul class="last_episodes">
            <li><a href="/anime/frieren"><img data-src="/img/frieren.jpg"></a><p class="name">Frieren</p></li>
            <li><a href="/anime/nameless"><img src="/img/nameless.jpg"></a></li>
        </ul>"#
            .to_string(),
        Duration::ZERO,
    )
    .await;
    mount_page(
        &server,
        "/home",
        r#"<div class="anime_item"><a href="/watch/frieren"><img src="/f.jpg"></a><span class="name">Frieren</span></div>
           <div class="anime_item"><a href="/watch/dandadan"><img src="/d.jpg"></a><span class="name">Dandadan</span></div>"#
            .to_string(),
        Duration::ZERO,
    )
    .await;

    let config = parse_config(&format!(
        r#"
[fetcher]
max-attempts = 1
base-delay-ms = 10

[[source]]
name = "pahe"
domain = "anime"
url = "{uri}/latest"
base-url = "{uri}"
container = ".last_episodes li"
title = ".name"
image = "img"
link = "a"

[[source]]
name = "kiss"
domain = "anime"
url = "{uri}/home"
container = ".anime_item"
title = ".name"
image = "img"
link = "a"
"#,
        uri = server.uri()
    ))
    .expect("valid config");

    let aggregator = Aggregator::from_config(&config).expect("aggregator builds");

    assert!(aggregator.aggregate_all(Domain::Manga).await.is_empty());

    let feed = aggregator.aggregate_all(Domain::Anime).await;
    assert_eq!(titles(&feed), vec!["Frieren", "Dandadan"]);
    assert_eq!(feed[0].link, format!("{}/anime/frieren", server.uri()));
    assert_eq!(feed[0].image, format!("{}/img/frieren.jpg", server.uri()));
}
