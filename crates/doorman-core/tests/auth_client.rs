//! Wire-level tests for the provider client against a mock auth API.

use doorman_core::auth::{AuthChange, AuthClient, AuthErrorKind, SessionCache};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, dir: &TempDir) -> AuthClient {
    AuthClient::new(
        &server.uri(),
        "publishable-key",
        SessionCache::at_path(dir.path().join("session.json")),
    )
}

fn token_body(access: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": {
            "id": "user-1",
            "email": "kim@example.com",
            "created_at": "2026-01-15T09:30:00Z",
            "email_confirmed_at": null
        }
    })
}

#[tokio::test]
async fn password_sign_in_returns_session_and_emits_event() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(body_json(json!({
            "email": "kim@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let mut sub = client.on_auth_state_change();

    let session = client
        .sign_in_with_password("kim@example.com", "hunter2")
        .await
        .expect("sign-in succeeds");

    assert_eq!(session.access_token, "access-1");
    assert_eq!(session.user.email.as_deref(), Some("kim@example.com"));
    assert!(!session.is_expired());

    let event = sub.try_recv().expect("SignedIn emitted");
    assert_eq!(event.change, AuthChange::SignedIn);
    assert_eq!(
        event.session.expect("session payload").access_token,
        "access-1"
    );

    // The cache now survives a fresh client instance.
    let restarted = client_for(&server, &dir);
    let restored = restarted.get_session().await.unwrap().expect("cached");
    assert_eq!(restored.access_token, "access-1");
}

#[tokio::test]
async fn provider_error_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let err = client
        .sign_in_with_password("kim@example.com", "wrong")
        .await
        .expect_err("sign-in fails");

    assert_eq!(err.kind, AuthErrorKind::Api);
    assert_eq!(err.message, "Invalid login credentials");
    assert!(err.is_provider_reported());
}

#[tokio::test]
async fn connection_failure_maps_to_transport_error() {
    let dir = TempDir::new().unwrap();
    // Nothing listens on this port.
    let client = AuthClient::new(
        "http://127.0.0.1:9",
        "publishable-key",
        SessionCache::at_path(dir.path().join("session.json")),
    );

    let err = client
        .sign_in_with_password("kim@example.com", "hunter2")
        .await
        .expect_err("connect fails");
    assert_eq!(err.kind, AuthErrorKind::Transport);
    assert!(!err.is_provider_reported());
}

#[tokio::test]
async fn recover_sends_redirect_target_and_apikey() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/recover"))
        .and(query_param(
            "redirect_to",
            "http://localhost:3000/reset-password",
        ))
        .and(body_json(json!({ "email": "kim@example.com" })))
        .and(wiremock::matchers::header("apikey", "publishable-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    client
        .reset_password_for_email("kim@example.com", "http://localhost:3000/reset-password")
        .await
        .expect("recover succeeds");
}

#[tokio::test]
async fn sign_out_revokes_with_bearer_token_and_clears_cache() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(bearer_token("access-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    client
        .sign_in_with_password("kim@example.com", "hunter2")
        .await
        .unwrap();

    let mut sub = client.on_auth_state_change();
    client.sign_out().await.expect("logout succeeds");

    let event = sub.try_recv().expect("SignedOut emitted");
    assert_eq!(event.change, AuthChange::SignedOut);
    assert!(event.session.is_none());

    assert!(client.current_session().is_none());
    assert!(client.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn expired_cached_session_is_refreshed_on_fetch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Seed the cache with an already-expired session.
    let cache = SessionCache::at_path(dir.path().join("session.json"));
    cache
        .save(&doorman_core::Session {
            access_token: "stale".to_string(),
            refresh_token: "refresh-old".to_string(),
            expires_at: 0,
            user: serde_json::from_value(token_body("x")["user"].clone()).unwrap(),
        })
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-old" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-3")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let mut sub = client.on_auth_state_change();

    let session = client.get_session().await.unwrap().expect("refreshed");
    assert_eq!(session.access_token, "access-3");

    let event = sub.try_recv().expect("TokenRefreshed emitted");
    assert_eq!(event.change, AuthChange::TokenRefreshed);
}

#[tokio::test]
async fn rejected_refresh_discards_the_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let cache = SessionCache::at_path(dir.path().join("session.json"));
    cache
        .save(&doorman_core::Session {
            access_token: "stale".to_string(),
            refresh_token: "refresh-revoked".to_string(),
            expires_at: 0,
            user: serde_json::from_value(token_body("x")["user"].clone()).unwrap(),
        })
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid Refresh Token"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    assert!(client.get_session().await.unwrap().is_none());
    // Cache was cleared; a second fetch stays local.
    assert!(client.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_up_without_autoconfirm_returns_no_session() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-2",
            "email": "new@example.com",
            "created_at": "2026-08-29T00:00:00Z",
            "email_confirmed_at": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let session = client.sign_up("new@example.com", "hunter2").await.unwrap();
    assert!(session.is_none());
    assert!(client.current_session().is_none());
}
