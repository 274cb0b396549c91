use axum::http::StatusCode;
use axum_test::TestServer;
use chrono_tz::Tz;
use minecraft_log_hook::app::{AppState, router};
use minecraft_log_hook::auth::{DEFAULT_EXPIRES_AT, TokenValidator, issue_token};
use minecraft_log_hook::domain::NotificationMessage;
use minecraft_log_hook::notifier::{DeliveryError, Notifier, WebhookNotifier};
use minecraft_log_hook::relay::LogRelay;
use minecraft_log_hook::time::TimeNormalizer;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SECRET: &str = "integration-secret";

/// Mock notifier that captures delivered messages for testing
struct MockNotifier {
    sent: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn deliver<'a>(
        &'a self,
        message: &'a NotificationMessage,
    ) -> Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>> {
        Box::pin(async move {
            if self.should_fail.load(Ordering::SeqCst) {
                return Err(DeliveryError::Status { status: 503 });
            }
            self.sent.lock().unwrap().push(message.to_string());
            Ok(())
        })
    }
}

fn create_test_server(notifier: Arc<dyn Notifier>) -> TestServer {
    let normalizer = TimeNormalizer::new(Tz::UTC, chrono_tz::Asia::Tokyo);
    let state = AppState::new(
        TokenValidator::new(SECRET),
        LogRelay::new(normalizer, notifier),
    );
    TestServer::new(router(state)).unwrap()
}

fn valid_token() -> String {
    issue_token(
        "fluentd",
        SECRET,
        chrono::Utc::now().timestamp(),
        DEFAULT_EXPIRES_AT,
    )
    .unwrap()
}

#[tokio::test]
async fn test_health_endpoint_returns_healthy() {
    let server = create_test_server(Arc::new(MockNotifier::new()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("Healthy");
}

#[tokio::test]
async fn test_connected_line_is_notified() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({
            "log": "[2024-01-01 00:00:00:000 INFO] Player connected: Alice, xuid: 2535400000000000"
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!("Ok"));
    assert_eq!(
        notifier.sent(),
        vec!["[2024-01-01T09:00:00+09:00] Alice が入室しました".to_string()]
    );
}

#[tokio::test]
async fn test_disconnected_line_is_notified() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({
            "log": "[2024-06-30 15:00:00:500 INFO] Player disconnected: Steve, xuid: 1, pfid: x"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        notifier.sent(),
        vec!["[2024-07-01T00:00:00.500000+09:00] Steve が退出しました".to_string()]
    );
}

#[tokio::test]
async fn test_unmatched_line_returns_ok_without_notification() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({ "log": "[2024-01-01 00:00:00:000 INFO] Server started." }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!("Ok"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_timestamp_still_returns_ok() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({ "log": "[yesterday INFO] Player connected: Alice, xuid: 1" }))
        .await;

    response.assert_status_ok();
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_still_returns_ok() {
    let notifier = Arc::new(MockNotifier::new());
    notifier.set_should_fail(true);
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({
            "log": "[2024-01-01 00:00:00:000 INFO] Player connected: Alice, xuid: 1"
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!("Ok"));
}

#[tokio::test]
async fn test_unreachable_webhook_still_returns_ok() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = format!("http://127.0.0.1:{port}/webhook").parse().unwrap();
    let notifier = WebhookNotifier::new(url, Duration::from_secs(2)).unwrap();
    let server = create_test_server(Arc::new(notifier));

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({
            "log": "[2024-01-01 00:00:00:000 INFO] Player disconnected: Bob, xuid: 1"
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!("Ok"));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .json(&json!({
            "log": "[2024-01-01 00:00:00:000 INFO] Player connected: Alice, xuid: 1"
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_token_with_wrong_secret_is_unauthorized() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());
    let token = issue_token("fluentd", "not-the-secret", 0, DEFAULT_EXPIRES_AT).unwrap();

    let response = server
        .post("/api")
        .authorization_bearer(token)
        .json(&json!({
            "log": "[2024-01-01 00:00:00:000 INFO] Player connected: Alice, xuid: 1"
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "detail": "Could not validate credentials" }));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let server = create_test_server(Arc::new(MockNotifier::new()));
    let token = issue_token("fluentd", SECRET, 1_000_000_000, 1_000_000_100).unwrap();

    let response = server
        .post("/api")
        .authorization_bearer(token)
        .json(&json!({ "log": "anything" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_is_checked_before_body() {
    let server = create_test_server(Arc::new(MockNotifier::new()));

    let response = server
        .post("/api")
        .text("not json")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_body_with_valid_token_is_client_error() {
    let notifier = Arc::new(MockNotifier::new());
    let server = create_test_server(notifier.clone());

    let response = server
        .post("/api")
        .authorization_bearer(valid_token())
        .json(&json!({ "message": "no log field" }))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
    assert!(notifier.sent().is_empty());
}
