mod common;

use chrono::NaiveDate;
use common::{error_json, fixture_json, list_json, test_client};
use scryfall_client::ClientError;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fury_sliver_rulings() -> serde_json::Value {
    list_json(json!([fixture_json("rulings.json")[0]]))
}

#[tokio::test]
async fn test_rulings_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/0000579f-7b35-4ed3-b44c-db2a538066fe/rulings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fury_sliver_rulings()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let rulings = client
        .rulings()
        .by_id(Uuid::parse_str("0000579f-7b35-4ed3-b44c-db2a538066fe").unwrap())
        .await
        .unwrap();

    assert_eq!(rulings.len(), 1);
    let ruling = &rulings[0];
    assert_eq!(
        ruling.oracle_id,
        Uuid::parse_str("44623693-51d6-49ad-8cd7-140505caf02f").unwrap()
    );
    assert_eq!(ruling.published_at, NaiveDate::from_ymd_opt(2020, 1, 10).unwrap());
    assert!(!ruling.is_official());
}

#[tokio::test]
async fn test_rulings_by_alternate_ids() {
    let mock_server = MockServer::start().await;

    for route in [
        "/cards/multiverse/3355/rulings",
        "/cards/mtgo/57934/rulings",
        "/cards/arena/67330/rulings",
        "/cards/tsp/157/rulings",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(fury_sliver_rulings()))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = test_client(&mock_server);
    let rulings = client.rulings();

    assert_eq!(rulings.by_multiverse_id(3355).await.unwrap().len(), 1);
    assert_eq!(rulings.by_mtgo_id(57934).await.unwrap().len(), 1);
    assert_eq!(rulings.by_arena_id(67330).await.unwrap().len(), 1);
    assert_eq!(
        rulings.by_collector_number("tsp", "157").await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_collector_number_is_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/plst/ELD%2F1/rulings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(json!([]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let rulings = client
        .rulings()
        .by_collector_number("plst", "ELD/1")
        .await
        .unwrap();

    assert!(rulings.is_empty());
}

#[tokio::test]
async fn test_collector_number_requires_both_parts() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);

    let err = client
        .rulings()
        .by_collector_number("", "157")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_unknown_card_rulings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/multiverse/1/rulings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json(
            404,
            "not_found",
            "No card found with the given ID or set code and collector number.",
        )))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.rulings().by_multiverse_id(1).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_transient());
}
