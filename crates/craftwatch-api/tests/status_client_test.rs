#![allow(clippy::unwrap_used)]
// Integration tests for `StatusClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use craftwatch_api::{Endpoints, Error, FailureKind, StatusClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, StatusClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client =
        StatusClient::with_client(reqwest::Client::new(), &base_url, &Endpoints::default())
            .unwrap();
    (server, client)
}

// ── Snapshot tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_snapshot() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playerCount": 2,
            "serverTime": 6000,
            "computerUptime": 7320,
            "computerID": "12",
            "players": ["Alex", "Steve"],
            "last_updated": 1_718_000_000
        })))
        .mount(&server)
        .await;

    let snap = client.fetch_snapshot().await.unwrap();

    assert_eq!(snap.player_count, 2);
    assert_eq!(snap.server_time, 6000);
    assert_eq!(snap.computer_uptime, 7320);
    assert_eq!(snap.computer_id.as_deref(), Some("12"));
    assert_eq!(snap.players, vec!["Alex".to_owned(), "Steve".to_owned()]);
    assert_eq!(snap.last_updated, Some(1_718_000_000));
}

#[tokio::test]
async fn test_fetch_snapshot_partial_document() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "players": [] })))
        .mount(&server)
        .await;

    let snap = client.fetch_snapshot().await.unwrap();

    assert_eq!(snap.player_count, 0);
    assert_eq!(snap.computer_id, None);
    assert!(snap.players.is_empty());
    assert_eq!(snap.last_updated, None);
}

#[tokio::test]
async fn test_fetch_snapshot_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/latest.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let result = client.fetch_snapshot().await;

    assert!(
        matches!(result, Err(Error::HttpStatus { status: 404, .. })),
        "expected HttpStatus error, got: {result:?}"
    );
    assert_eq!(result.unwrap_err().kind(), FailureKind::HttpStatus);
}

#[tokio::test]
async fn test_fetch_snapshot_invalid_json() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_snapshot().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Parse);
    match err {
        Error::Parse { body_preview, .. } => assert_eq!(body_preview, "<html>oops</html>"),
        other => panic!("expected Parse error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_snapshot_rejects_non_object() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let err = client.fetch_snapshot().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
}

#[tokio::test]
async fn test_fetch_snapshot_connection_refused() {
    // Reserve a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base_url = Url::parse(&format!("http://{addr}/")).unwrap();

    let client =
        StatusClient::with_client(reqwest::Client::new(), &base_url, &Endpoints::default())
            .unwrap();
    let err = client.fetch_snapshot().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Network);
}

// ── History tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_history() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/history.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": [
                { "timestamp": 1_718_000_000, "player_count": 1, "players": ["Alex"] },
                { "timestamp": 1_718_000_600, "player_count": 3 },
                { "timestamp": 1_718_001_200 }
            ]
        })))
        .mount(&server)
        .await;

    let history = client.fetch_history().await.unwrap();
    let counts: Vec<u64> = history.updates().iter().map(|u| u.player_count).collect();

    assert_eq!(counts, vec![1, 3, 0]);
    assert_eq!(history.updates()[0].players, vec!["Alex".to_owned()]);
}

#[tokio::test]
async fn test_fetch_history_malformed_updates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/data/history.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updates": "none" })))
        .mount(&server)
        .await;

    let err = client.fetch_history().await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parse);
}

#[tokio::test]
async fn test_custom_endpoints_resolve_under_base_path() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/status", server.uri())).unwrap();
    let endpoints = Endpoints {
        snapshot: "now.json".into(),
        history: "past.json".into(),
    };
    let client =
        StatusClient::with_client(reqwest::Client::new(), &base_url, &endpoints).unwrap();

    Mock::given(method("GET"))
        .and(path("/status/now.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "playerCount": 9 })))
        .mount(&server)
        .await;

    let snap = client.fetch_snapshot().await.unwrap();
    assert_eq!(snap.player_count, 9);
    assert_eq!(client.history_url().path(), "/status/past.json");
}
