//! Login against a mocked backend: tokens land in session storage and the
//! session holds the returned user.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use judgeflow::adapters::{MemorySessionStorage, ReqwestHttpClient};
use judgeflow::api::JudgeApi;
use judgeflow::app::{App, AppMessage, Screen};
use judgeflow::auth::Tokens;
use judgeflow::session::{SessionManager, SessionState};
use judgeflow::traits::SessionStorage;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_body() -> serde_json::Value {
    json!({
        "success": true,
        "tokens": {"access": "A", "refresh": "R"},
        "user": {"id": 3, "username": "alice", "email": "alice@example.com", "is_staff": false}
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/accounts/login/"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(server)
        .await;
}

fn api_for(server: &MockServer, storage: &MemorySessionStorage) -> JudgeApi {
    JudgeApi::with_parts(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(storage.clone()),
        &format!("{}/api", server.uri()),
    )
}

#[tokio::test]
async fn test_login_persists_tokens_and_resolves_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let storage = MemorySessionStorage::new();
    let api = api_for(&server, &storage);
    let mut session = SessionManager::new(Arc::new(storage.clone()));

    let user = api.login("alice", "secret").await.unwrap();
    session.login(user);

    assert_eq!(storage.snapshot(), Tokens::new("A", "R"));
    assert!(session.is_authenticated());
    assert_eq!(session.user().map(|u| u.username.as_str()), Some("alice"));
    assert!(matches!(session.state(), SessionState::Authenticated(_)));
}

#[tokio::test]
async fn test_rejected_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/accounts/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::new();
    let err = api_for(&server, &storage)
        .login("alice", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!storage.has_access_token());
    // No refresh without a token to refresh.
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_profile_after_login_carries_new_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/accounts/profile/"))
        .and(header("Authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 3, "username": "alice", "email": "alice@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::new();
    let api = api_for(&server, &storage);
    api.login("alice", "secret").await.unwrap();

    let mut session = SessionManager::new(Arc::new(storage.clone()));
    session.initialize(&api).await;
    assert_eq!(session.user().map(|u| u.id), Some(3));
}

async fn next_message(rx: &mut mpsc::UnboundedReceiver<AppMessage>) -> AppMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("channel closed")
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[tokio::test]
async fn test_login_form_signs_in_through_the_app() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let storage = MemorySessionStorage::new();
    let mut app = App::new(Arc::new(api_for(&server, &storage)));
    let mut rx = app.message_rx.take().unwrap();
    app.start();
    assert_eq!(app.screen, Screen::Login);

    for c in "alice".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Tab);
    for c in "secret".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    let message = next_message(&mut rx).await;
    app.handle_message(message);

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(
        app.session.user().map(|u| u.username.as_str()),
        Some("alice")
    );
    assert_eq!(app.api.storage().access_token().as_deref(), Some("A"));
    assert_eq!(app.api.storage().refresh_token().as_deref(), Some("R"));
}
