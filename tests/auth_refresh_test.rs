//! Bearer attachment and the single refresh-and-retry, exercised over real
//! HTTP against a wiremock server.

use std::sync::Arc;

use judgeflow::adapters::{MemorySessionStorage, ReqwestHttpClient};
use judgeflow::api::JudgeApi;
use judgeflow::auth::{AuthenticatedClient, Tokens};
use judgeflow::error::ApiError;
use judgeflow::traits::SessionStorage;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROBLEMS: &str = "/api/problems/";
const REFRESH: &str = "/api/accounts/token/refresh/";

fn client(server: &MockServer, storage: &MemorySessionStorage) -> AuthenticatedClient {
    AuthenticatedClient::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(storage.clone()),
        &format!("{}/api", server.uri()),
    )
}

fn problems_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), PROBLEMS)
}

async fn refresh_calls(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == REFRESH)
        .count()
}

#[tokio::test]
async fn test_no_token_sends_no_header_and_returns_401_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::new();
    let response = client(&server, &storage)
        .get(&problems_url(&server))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    let received = server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
    assert_eq!(refresh_calls(&server).await, 0);
}

#[tokio::test]
async fn test_valid_token_is_attached_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .and(header("Authorization", "Bearer good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"problems": []})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::with_tokens(Tokens::new("good-token", "R"));
    let response = client(&server, &storage)
        .get(&problems_url(&server))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(refresh_calls(&server).await, 0);
    assert_eq!(storage.access_token().as_deref(), Some("good-token"));
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_retries_with_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .and(body_json(json!({"refresh": "R"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"problems": []})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::with_tokens(Tokens::new("expired", "R"));
    let response = client(&server, &storage)
        .get(&problems_url(&server))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(storage.snapshot(), Tokens::new("fresh", "R"));
}

#[tokio::test]
async fn test_rejected_refresh_clears_tokens_and_returns_original_401() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::with_tokens(Tokens::new("expired", "stale"));
    let response = client(&server, &storage)
        .get(&problems_url(&server))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(response.text(), r#"{"detail":"expired"}"#);
    assert_eq!(storage.access_token(), None);
    assert_eq!(storage.refresh_token(), None);
}

#[tokio::test]
async fn test_unreachable_refresh_counts_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::with_tokens(Tokens::new("expired", "R"));
    // Refresh goes to a port nobody listens on.
    let client = AuthenticatedClient::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(storage.clone()),
        "http://127.0.0.1:9/api",
    );
    let response = client.get(&problems_url(&server)).await.unwrap();

    assert_eq!(response.status, 401);
    assert!(!storage.has_access_token());
}

#[tokio::test]
async fn test_second_401_never_starts_another_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(REFRESH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemorySessionStorage::with_tokens(Tokens::new("expired", "R"));
    let response = client(&server, &storage)
        .get(&problems_url(&server))
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    assert_eq!(refresh_calls(&server).await, 1);
    // The refreshed token is kept: it was issued, only the retry was refused.
    assert_eq!(storage.access_token().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_typed_client_surfaces_status_with_endpoint_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROBLEMS))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let api = JudgeApi::with_parts(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(MemorySessionStorage::new()),
        &format!("{}/api", server.uri()),
    );
    let err = api.problems(&Default::default()).await.unwrap_err();

    match &err {
        ApiError::Status {
            context,
            status,
            detail,
        } => {
            assert_eq!(*context, "Failed to fetch problems");
            assert_eq!(*status, 500);
            assert_eq!(detail.as_deref(), Some("db down"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "db down");
}
