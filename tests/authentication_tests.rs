//! Integration tests for the credential lifecycle.
//!
//! These tests run the authorization-code and refresh-token grants against a
//! mock token endpoint and verify the session updates and the behavior of the
//! background refresher.

use std::time::Duration;

use serde_json::json;
use stockx_api::{
    ApiKey, AuthError, AuthorizationCode, BaseUrl, ClientId, ClientSecret, RefreshEvent, Session,
    StockXClient, StockXConfig, StockXConfigBuilder,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_builder(server: &MockServer) -> StockXConfigBuilder {
    StockXConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .api_key(ApiKey::new("api-key").unwrap())
        .authorization_code(AuthorizationCode::new("auth-code").unwrap())
        .token_url(BaseUrl::new(format!("{}/oauth/token", server.uri())).unwrap())
        .api_base_url(BaseUrl::new(format!("{}/v2", server.uri())).unwrap())
}

fn test_config(server: &MockServer) -> StockXConfig {
    config_builder(server).build().unwrap()
}

fn token_mock(grant_type: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains(format!("grant_type={grant_type}")))
}

async fn next_event(events: &mut tokio::sync::broadcast::Receiver<RefreshEvent>) -> RefreshEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for refresh event")
        .expect("refresh event channel closed")
}

// ============================================================================
// Authenticate
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_authenticate_populates_session_and_refreshes_once_after_expiry() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A",
            "refresh_token": "R",
            "expires_in": 1,
            "token_type": "Bearer",
            "scope": "offline_access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    client.authenticate().await.unwrap();

    let session = client.session();
    assert_eq!(session.access_token, "A");
    assert_eq!(session.refresh_token, "R");
    assert_eq!(session.expires_in, 1);
    assert!(client.is_auto_refreshing());

    tokio::time::sleep(Duration::from_millis(1600)).await;

    let session = client.session();
    assert_eq!(session.access_token, "A2");
    assert_eq!(session.refresh_token, "R");
    assert_eq!(session.expires_in, 3600);

    server.verify().await;
}

#[tokio::test]
async fn test_authenticate_sends_form_encoded_grant() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Flocalhost%3A3000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A",
            "refresh_token": "R",
            "expires_in": 43200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    client.authenticate().await.unwrap();

    assert_eq!(client.access_token(), "A");
}

#[tokio::test]
async fn test_authenticate_rejected_returns_body_and_leaves_session_empty() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    let result = client.authenticate().await;

    match result {
        Err(AuthError::AuthenticationFailed { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, r#"{"error":"invalid_grant"}"#);
        }
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }

    assert_eq!(client.session(), Session::default());
    assert!(!client.is_auto_refreshing());
}

#[tokio::test]
async fn test_authenticate_malformed_response_is_decode_error() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    let result = client.authenticate().await;

    assert!(matches!(result, Err(AuthError::Decode(_))));
    assert_eq!(client.access_token(), "");
}

#[tokio::test]
async fn test_authenticate_empty_access_token_is_rejected() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "",
            "refresh_token": "R",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    let result = client.authenticate().await;

    assert!(matches!(
        result,
        Err(AuthError::InvalidTokenResponse {
            field: "access_token"
        })
    ));
    assert_eq!(client.session(), Session::default());
    assert!(!client.is_auto_refreshing());
}

#[tokio::test]
async fn test_authenticate_empty_refresh_token_is_rejected() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A",
            "refresh_token": "",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    let result = client.authenticate().await;

    assert!(matches!(
        result,
        Err(AuthError::InvalidTokenResponse {
            field: "refresh_token"
        })
    ));
    assert_eq!(client.session(), Session::default());
    assert!(!client.is_auto_refreshing());
}

#[tokio::test]
async fn test_authenticate_unreachable_endpoint_is_transport_error() {
    let config = StockXConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .api_key(ApiKey::new("api-key").unwrap())
        .authorization_code(AuthorizationCode::new("auth-code").unwrap())
        .token_url(BaseUrl::new("http://127.0.0.1:1/oauth/token").unwrap())
        .build()
        .unwrap();

    let client = StockXClient::new(config).unwrap();
    let result = client.authenticate().await;

    assert!(matches!(result, Err(AuthError::Transport(_))));
    assert_eq!(client.session(), Session::default());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_authenticate_replaces_refresher() {
    let server = MockServer::start().await;

    token_mock("authorization_code")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A",
            "refresh_token": "R",
            "expires_in": 1
        })))
        .expect(2)
        .mount(&server)
        .await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    client.authenticate().await.unwrap();
    client.authenticate().await.unwrap();

    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert_eq!(client.access_token(), "A2");
    server.verify().await;
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_updates_only_access_token_and_expiry() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .and(body_string_contains("refresh_token=R"))
        .and(body_string_contains("audience=gateway.stockx.com"))
        .and(body_string_contains("client_id=client-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 30
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 3600)).unwrap();
    client.refresh_token().await.unwrap();

    let session = client.session();
    assert_eq!(session.access_token, "A2");
    assert_eq!(session.refresh_token, "R");
    assert_eq!(session.expires_in, 30);
    assert!(session.obtained_at.is_some());
}

#[tokio::test]
async fn test_refresh_stores_rotated_refresh_token() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "refresh_token": "R2",
            "expires_in": 30
        })))
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 3600)).unwrap();
    client.refresh_token().await.unwrap();

    assert_eq!(client.session().refresh_token, "R2");
}

#[tokio::test]
async fn test_refresh_rejected_keeps_stale_token() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(401).set_body_string("refresh token expired"))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 3600)).unwrap();
    let result = client.refresh_token().await;

    match result {
        Err(AuthError::AuthenticationFailed { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "refresh token expired");
        }
        other => panic!("expected AuthenticationFailed, got {other:?}"),
    }

    assert_eq!(client.session(), Session::new("A", "R", 3600));
}

#[tokio::test]
async fn test_refresh_empty_access_token_keeps_stale_token() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "",
            "refresh_token": "R2",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 3600)).unwrap();
    let result = client.refresh_token().await;

    assert!(matches!(
        result,
        Err(AuthError::InvalidTokenResponse {
            field: "access_token"
        })
    ));
    assert_eq!(client.session(), Session::new("A", "R", 3600));
}

#[tokio::test]
async fn test_two_refreshes_keep_second_values() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 30
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A3",
            "expires_in": 60
        })))
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 3600)).unwrap();
    client.refresh_token().await.unwrap();
    client.refresh_token().await.unwrap();

    let session = client.session();
    assert_eq!(session.access_token, "A3");
    assert_eq!(session.expires_in, 60);
    assert_eq!(session.refresh_token, "R");
}

#[tokio::test]
async fn test_refresh_without_refresh_token_sends_nothing() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = StockXClient::new(test_config(&server)).unwrap();
    let result = client.refresh_token().await;

    assert!(matches!(result, Err(AuthError::MissingRefreshToken)));
}

// ============================================================================
// Background refresher
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stop_auto_refresh_prevents_refresh() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 3600
        })))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 1)).unwrap();
    client.start_auto_refresh();
    client.stop_auto_refresh();

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(client.access_token(), "A");
    assert!(!client.is_auto_refreshing());
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dropping_client_stops_refresher() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 3600
        })))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 1)).unwrap();
    let mut events = client.subscribe_refresh_events();
    client.start_auto_refresh();
    drop(client);

    assert_eq!(next_event(&mut events).await, RefreshEvent::Stopped);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_background_refresh_publishes_refreshed_event() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    let client =
        StockXClient::with_session(test_config(&server), Session::new("A", "R", 1)).unwrap();
    let mut events = client.subscribe_refresh_events();
    client.start_auto_refresh();

    assert_eq!(
        next_event(&mut events).await,
        RefreshEvent::Refreshed { expires_in: 3600 }
    );
    assert_eq!(client.access_token(), "A2");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_background_refresh_failure_is_published_and_retried() {
    let server = MockServer::start().await;

    token_mock("refresh_token")
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let config = config_builder(&server)
        .refresh_retry_interval(Duration::from_secs(1))
        .build()
        .unwrap();
    let client = StockXClient::with_session(config, Session::new("A", "R", 1)).unwrap();
    let mut events = client.subscribe_refresh_events();
    client.start_auto_refresh();

    match next_event(&mut events).await {
        RefreshEvent::Failed {
            status,
            message,
            consecutive_failures,
        } => {
            assert_eq!(status, Some(500));
            assert!(message.contains("upstream unavailable"));
            assert_eq!(consecutive_failures, 1);
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    match next_event(&mut events).await {
        RefreshEvent::Failed {
            consecutive_failures,
            ..
        } => assert_eq!(consecutive_failures, 2),
        other => panic!("expected Failed, got {other:?}"),
    }

    // The stale token stays in place
    assert_eq!(client.access_token(), "A");
    assert!(client.is_auto_refreshing());
}
