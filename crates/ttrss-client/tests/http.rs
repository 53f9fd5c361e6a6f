//! End-to-end tests of the HTTP channel against a local mock server.
//!
//! The reqwest blocking client must not run on an async worker thread, so
//! every client interaction goes through `spawn_blocking`.

use serde_json::{json, Map, Value};
use ttrss_client::RpcChannel;
use ttrss_core::{ClientError, FeedTreeNode, SubscribeCode};
use ttrss_settings::ConnInfo;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(status: i64, content: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"seq": 0, "status": status, "content": content}))
}

async fn blocking<R: Send + 'static>(f: impl FnOnce() -> R + Send + 'static) -> R {
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn login_then_feed_tree_carries_sid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tt-rss/api/"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"op": "login", "user": "admin", "password": "pw"})))
        .respond_with(envelope(0, json!({"session_id": "abc123", "api_level": 15})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tt-rss/api/"))
        .and(body_partial_json(json!({"op": "getFeedTree", "sid": "abc123", "include_empty": false})))
        .respond_with(envelope(
            0,
            json!({"categories": {"identifier": "id", "items": [
                {"bare_id": -1, "name": "Special", "type": "category", "items": [
                    {"bare_id": -4, "name": "All articles", "type": "feed"}
                ]},
                {"bare_id": 3, "name": "Planet", "type": "feed", "error": "timeout"}
            ]}}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let host = format!("{}/tt-rss", server.uri());
    let tree = blocking(move || -> Result<FeedTreeNode, ClientError> {
        let conn = ConnInfo::new(host, "admin", "pw");
        let mut channel = RpcChannel::http(&conn)?;
        let _ = channel.login(&conn)?;
        channel.get_feed_tree(false)
    })
    .await
    .unwrap();

    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.children[0].children[0].id, -4);
    assert!(tree.children[1].has_error());
}

#[tokio::test(flavor = "multi_thread")]
async fn login_request_has_no_sid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(envelope(0, json!({"session_id": "s"})))
        .mount(&server)
        .await;

    let host = server.uri();
    blocking(move || {
        let conn = ConnInfo::new(host, "admin", "pw");
        let mut channel = RpcChannel::http(&conn).unwrap();
        assert!(channel.login(&conn).unwrap());
    })
    .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/");
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["op"], "login");
    assert!(body.get("sid").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(envelope(1, json!({"error": "LOGIN_ERROR"})))
        .mount(&server)
        .await;

    let host = server.uri();
    let err = blocking(move || {
        let conn = ConnInfo::new(host, "admin", "wrong");
        let mut channel = RpcChannel::http(&conn).unwrap();
        channel.login(&conn).unwrap_err()
    })
    .await;

    match err {
        ClientError::Auth { detail, user, .. } => {
            assert_eq!(detail.as_deref(), Some("LOGIN_ERROR"));
            assert_eq!(user, "admin");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn http_status_does_not_decide_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"seq": 0, "status": 0, "content": {"version": "22.0"}})),
        )
        .mount(&server)
        .await;

    let host = server.uri();
    let envelope = blocking(move || {
        let conn = ConnInfo::new(host, "admin", "");
        RpcChannel::http(&conn).unwrap().call("getVersion", Map::new())
    })
    .await
    .unwrap();
    assert!(envelope.is_ok());
    assert_eq!(envelope.content()["version"], "22.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn html_page_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html><body>Not Found</body></html>"))
        .mount(&server)
        .await;

    let host = server.uri();
    let err = blocking(move || {
        let conn = ConnInfo::new(host, "admin", "pw");
        RpcChannel::http(&conn).unwrap().call("getVersion", Map::new())
    })
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.to_string().contains("correct URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn subscribe_reports_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"op": "subscribeToFeed", "feed_url": "https://example.org/page", "category_id": 2})))
        .respond_with(envelope(0, json!({"status": {"code": 4, "message": "pick one"}})))
        .mount(&server)
        .await;

    let host = server.uri();
    let sub = blocking(move || {
        let conn = ConnInfo::new(host, "admin", "pw");
        RpcChannel::http(&conn)
            .unwrap()
            .subscribe_to_feed("https://example.org/page", 2, None)
    })
    .await
    .unwrap();
    assert!(!sub.subscribed);
    assert_eq!(sub.outcome.code, SubscribeCode::HtmlMultipleFeeds);
    assert_eq!(sub.outcome.message, "pick one");
}

#[test]
fn unreachable_server_is_connection_error() {
    let conn = ConnInfo::new("http://127.0.0.1:1", "admin", "pw");
    let mut channel = RpcChannel::http(&conn).unwrap();
    let err = channel.login(&conn).unwrap_err();
    assert!(err.is_connection(), "got {err:?}");
}
