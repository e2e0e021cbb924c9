use mockito::Matcher;
use serde_json::json;

use review_watchdog::api::{FetchError, StatusApiClient, StatusSource};
use review_watchdog::config::{ApiConfig, TelegramConfig};
use review_watchdog::notify::{Notifier, SendError, TelegramNotifier};

const STATUS_PATH: &str = "/api/user_api/homework_statuses/";

fn api_config(base: &str) -> ApiConfig {
    ApiConfig {
        token: "secret".to_string(),
        endpoint: format!("{base}{STATUS_PATH}"),
        ..ApiConfig::default()
    }
}

fn telegram_config(base: &str) -> TelegramConfig {
    TelegramConfig {
        token: "BOT-TOKEN".to_string(),
        chat_id: "42".to_string(),
        api_base: base.to_string(),
        ..TelegramConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_cursor_and_authorization() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", STATUS_PATH)
        .match_query(Matcher::UrlEncoded("from_date".into(), "1000".into()))
        .match_header("authorization", "OAuth secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"homeworks": [], "current_date": 1600}"#)
        .create_async()
        .await;

    let client = StatusApiClient::new(&api_config(&server.url())).unwrap();
    let body = client.fetch(1000).await.unwrap();

    assert_eq!(body, json!({"homeworks": [], "current_date": 1600}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_surfaces_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", STATUS_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"code": "not_authenticated"}"#)
        .create_async()
        .await;

    let client = StatusApiClient::new(&api_config(&server.url())).unwrap();
    let err = client.fetch(0).await.unwrap_err();

    assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 401));
}

#[tokio::test]
async fn test_fetch_rejects_non_json_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", STATUS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = StatusApiClient::new(&api_config(&server.url())).unwrap();
    let err = client.fetch(0).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_reports_unreachable_endpoint() {
    let client = StatusApiClient::new(&api_config("http://127.0.0.1:1")).unwrap();
    let err = client.fetch(0).await.unwrap_err();

    assert!(matches!(err, FetchError::Request(_)));
}

#[tokio::test]
async fn test_telegram_posts_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/botBOT-TOKEN/sendMessage")
        .match_body(Matcher::Json(json!({"chat_id": "42", "text": "hello"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true, "result": {"message_id": 7}}"#)
        .create_async()
        .await;

    let notifier = TelegramNotifier::new(&telegram_config(&server.url())).unwrap();
    notifier.send("42", "hello").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_telegram_rejection_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/botBOT-TOKEN/sendMessage")
        .with_status(200)
        .with_body(r#"{"ok": false, "description": "Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let notifier = TelegramNotifier::new(&telegram_config(&server.url())).unwrap();
    let err = notifier.send("42", "hello").await.unwrap_err();

    assert!(matches!(err, SendError::Rejected(ref d) if d == "Bad Request: chat not found"));
}

#[tokio::test]
async fn test_telegram_http_error_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/botBOT-TOKEN/sendMessage")
        .with_status(403)
        .with_body(r#"{"ok": false, "description": "Forbidden"}"#)
        .create_async()
        .await;

    let notifier = TelegramNotifier::new(&telegram_config(&server.url())).unwrap();
    let err = notifier.send("42", "hello").await.unwrap_err();

    assert!(matches!(err, SendError::Status(s) if s.as_u16() == 403));
    // The bot token must not leak into logged error text
    assert!(!err.to_string().contains("BOT-TOKEN"));
}
