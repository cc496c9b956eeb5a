mod common;

use scryfall_client::domain::models::ApiConfig;
use scryfall_client::{ReqwestTransport, ResilientTransport, SlidingWindowLimiter, TransportError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(window: Duration, capacity: usize) -> ResilientTransport {
    let inner = ReqwestTransport::from_config(&ApiConfig::default()).unwrap();
    let limiter = Arc::new(SlidingWindowLimiter::new(window, capacity));
    ResilientTransport::new(inner, limiter)
        .with_backoff(Duration::from_millis(50), Duration::from_millis(200))
}

fn get(url: &str) -> reqwest::Request {
    reqwest::Client::new().get(url).build().unwrap()
}

#[tokio::test]
async fn test_error_statuses_are_returned_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/random"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport(Duration::from_secs(1), 5);
    let response = transport
        .send(get(&format!("{}/cards/random", mock_server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "boom");
}

#[tokio::test]
async fn test_sends_configured_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bulk-data"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = ApiConfig {
        user_agent: "deck-tracker/2.1".to_string(),
        ..ApiConfig::default()
    };
    let inner = ReqwestTransport::from_config(&config).unwrap();
    let request = inner
        .client()
        .get(format!("{}/bulk-data", mock_server.uri()))
        .build()
        .unwrap();
    let limiter = Arc::new(SlidingWindowLimiter::new(Duration::from_secs(1), 5));

    ResilientTransport::new(inner, limiter)
        .send(request)
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].headers["user-agent"], "deck-tracker/2.1");
    assert_eq!(received[0].headers["accept"], "application/json");
}

#[tokio::test]
async fn test_connection_failure_is_round_trip_error() {
    let transport = transport(Duration::from_secs(1), 5);

    // Nothing listens on port 1
    let err = transport.send(get("http://127.0.0.1:1/cards")).await.unwrap_err();

    assert!(err.is_round_trip());
    assert!(err.is_transient());
    // Only one admission was spent
    assert_eq!(transport.limiter().available(), 4);
}

#[tokio::test]
async fn test_second_request_waits_for_the_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let window = Duration::from_millis(300);
    let transport = transport(window, 1);
    let url = format!("{}/cards/random", mock_server.uri());

    let start = Instant::now();
    transport.send(get(&url)).await.unwrap();
    transport.send(get(&url)).await.unwrap();

    assert!(start.elapsed() >= window);
}

#[tokio::test]
async fn test_budget_exhausted_before_admission() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport(Duration::from_secs(60), 1).with_max_retries(3);
    let url = format!("{}/cards/random", mock_server.uri());

    transport.send(get(&url)).await.unwrap();
    let err = transport.send(get(&url)).await.unwrap_err();

    assert!(matches!(err, TransportError::LimiterTimeout { attempts: 3 }));
    assert!(err.is_limiter_timeout());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clones_share_one_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let transport = transport(Duration::from_secs(60), 3).with_max_retries(1);
    let url = format!("{}/cards/random", mock_server.uri());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let transport = transport.clone();
            let request = get(&url);
            tokio::spawn(async move { transport.send(request).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}
