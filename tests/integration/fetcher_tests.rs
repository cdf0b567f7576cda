use crate::common::test_fetcher;
use otaku_feed::FeedError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fails `failures` times with a 500, then serves a page
async fn flaky_server(failures: u64) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(failures)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    server
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .len()
}

#[tokio::test]
async fn test_succeeds_after_k_failures() {
    let server = flaky_server(2).await;
    let fetcher = test_fetcher(4, 5);

    let page = fetcher
        .fetch_with_retry(&format!("{}/", server.uri()), 4)
        .await
        .expect("third attempt succeeds");

    assert_eq!(page.status_code, 200);
    assert_eq!(page.body, "<html>ok</html>");
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_fails_when_attempts_do_not_exceed_failures() {
    let server = flaky_server(3).await;
    let fetcher = test_fetcher(3, 5);

    let result = fetcher
        .fetch_with_retry(&format!("{}/", server.uri()), 3)
        .await;

    assert!(matches!(result, Err(FeedError::Status { status: 500, .. })));
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_single_attempt_does_not_retry() {
    let server = flaky_server(1).await;
    let fetcher = test_fetcher(1, 5);

    let result = fetcher.fetch(&format!("{}/", server.uri())).await;

    assert!(result.is_err());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_not_found_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = test_fetcher(2, 5);
    let result = fetcher.fetch(&format!("{}/gone", server.uri())).await;

    assert!(matches!(result, Err(FeedError::Status { status: 404, .. })));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_concurrency_cap_holds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("slow")
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let limit = 3;
    let fetcher = test_fetcher(1, limit);
    let started = Instant::now();

    let handles: Vec<_> = (0..9)
        .map(|i| {
            let fetcher = fetcher.clone();
            let url = format!("{}/page/{}", server.uri(), i);
            tokio::spawn(async move { fetcher.fetch(&url).await })
        })
        .collect();

    let mut peak = 0;
    while handles.iter().any(|h| !h.is_finished()) {
        let in_flight = fetcher.in_flight();
        assert!(in_flight <= limit, "{} requests in flight", in_flight);
        peak = peak.max(in_flight);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // The cap admits `limit` requests at once rather than serialising them
    assert_eq!(peak, limit);
    assert_eq!(fetcher.in_flight(), 0);
    assert_eq!(request_count(&server).await, 9);
    // Nine 200ms requests, three at a time
    assert!(started.elapsed() >= Duration::from_millis(550));
}
