//! Integration tests for the HTTP adapters against a stub server.
//!
//! Verifies endpoint shapes, bearer auth, and the mapping of transport
//! and server failures into the domain error taxonomy.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tandem::adapters::mock::InMemoryLocalStore;
use tandem::adapters::{HttpIdentityService, HttpProfileMirror};
use tandem::error::{AuthError, SyncError};
use tandem::preferences::{PreferenceStore, SyncRetryPolicy};
use tandem::traits::{IdentityService, LocalStore, ProfileMirror};

#[tokio::test]
async fn test_sign_in_success_parses_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/session"))
        .and(body_json(json!({
            "identifier": "marisol",
            "secret": "s3cret!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "user-1",
            "username": "marisol",
            "display_name": "Marisol",
            "locale": "es"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpIdentityService::with_base_url(server.uri());
    let profile = client.sign_in("marisol", "s3cret!").await.unwrap();

    assert_eq!(profile.user_id, "user-1");
    assert_eq!(profile.username, "marisol");
    assert_eq!(profile.display_name.as_deref(), Some("Marisol"));
    assert_eq!(profile.locale.as_deref(), Some("es"));
    assert!(profile.email.is_none());
}

#[tokio::test]
async fn test_sign_in_401_maps_to_invalid_credentials_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "unknown user or wrong password"
        })))
        .mount(&server)
        .await;

    let client = HttpIdentityService::with_base_url(server.uri());
    let err = client.sign_in("marisol", "wrong").await.unwrap_err();

    assert_eq!(
        err,
        AuthError::InvalidCredentials {
            message: "unknown user or wrong password".to_string()
        }
    );
}

#[tokio::test]
async fn test_sign_in_unreachable_maps_to_network_failure() {
    // Nothing listens here.
    let client = HttpIdentityService::with_base_url("http://127.0.0.1:1".to_string());
    let err = client.sign_in("marisol", "s3cret!").await.unwrap_err();
    assert!(matches!(err, AuthError::NetworkFailure { .. }));
}

#[tokio::test]
async fn test_change_password_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/session/password"))
        .and(body_json(json!({
            "current_password": "old-secret",
            "new_password": "new-secret"
        })))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpIdentityService::with_base_url(server.uri()).with_auth("tok-123");
    client
        .change_password("old-secret", "new-secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_password_500_maps_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/session/password"))
        .respond_with(ResponseTemplate::new(500).set_body_string("password service exploded"))
        .mount(&server)
        .await;

    let client = HttpIdentityService::with_base_url(server.uri());
    let err = client
        .change_password("old-secret", "new-secret")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::Unknown {
            message: "password service exploded".to_string()
        }
    );
}

#[tokio::test]
async fn test_mirror_put_writes_value() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/preferences/dark_mode"))
        .and(body_json(json!(true)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mirror = HttpProfileMirror::with_base_url(server.uri());
    mirror.set_remote("dark_mode", &json!(true)).await.unwrap();
}

#[tokio::test]
async fn test_mirror_failure_maps_to_remote_write_failed() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/preferences/dark_mode"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mirror = HttpProfileMirror::with_base_url(server.uri());
    let err = mirror
        .set_remote("dark_mode", &json!(true))
        .await
        .unwrap_err();

    match err {
        SyncError::RemoteWriteFailed { message } => assert!(message.contains("503")),
        other => panic!("expected remote write failure, got {:?}", other),
    }
}

/// Full stack: preference store over the real HTTP mirror, confirming
/// an optimistic write against the stub server.
#[tokio::test]
async fn test_preference_store_confirms_through_http_mirror() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/preferences/locale"))
        .and(body_json(json!("fr")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let local = Arc::new(InMemoryLocalStore::new());
    let mirror = Arc::new(HttpProfileMirror::with_base_url(server.uri()));
    let store = PreferenceStore::with_retry_policy(
        local.clone(),
        mirror,
        SyncRetryPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
        },
    );

    store.set("locale", "fr").unwrap();
    assert_eq!(store.get::<String>("locale"), Some("fr".to_string()));

    // Give the background confirmation time to land; the mock's
    // expectation verifies exactly one request arrived.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(store.last_sync_error("locale").is_none());
    assert_eq!(local.get_local("locale"), Some(json!("fr")));
}
