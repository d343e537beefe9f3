use clerk_auth::{AuthError, ClerkAuth, ClerkSettings};
use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::json;

const KEY: &str = "pk_test_Y2xlcmsuZXhhbXBsZS5jb20k";

fn settings(server: &MockServer) -> ClerkSettings {
    ClerkSettings {
        publishable_key: KEY.to_string(),
        secret_key: Some("sk_test_secret".to_string()),
        api_url: server.base_url(),
        frontend_api_url: Some(server.base_url()),
    }
}

#[tokio::test]
async fn initialize_loads_environment_once() {
    let server = MockServer::start_async().await;
    let environment = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(200)
                .json_body(json!({ "auth_config": { "object": "auth_config" } }));
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    assert!(auth.handle().is_none());

    auth.initialize().await.expect("first initialize");
    auth.initialize().await.expect("second initialize");

    environment.assert_calls_async(1).await;
    assert!(auth.is_initialized());
    assert_eq!(
        auth.handle().map(|c| c.publishable_key().frontend_api()),
        Some("clerk.example.com")
    );
}

#[tokio::test]
async fn invalid_key_never_reaches_load_step() {
    let server = MockServer::start_async().await;
    let environment = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(200).json_body(json!({}));
        })
        .await;

    for key in ["", "pk_test_not-base64!"] {
        let auth = ClerkAuth::new(ClerkSettings {
            publishable_key: key.to_string(),
            ..settings(&server)
        });

        let err = auth.initialize().await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::MissingPublishableKey | AuthError::InvalidPublishableKey(_)
        ));
        assert!(auth.handle().is_none());
    }

    environment.assert_calls_async(0).await;
}

#[tokio::test]
async fn failed_load_leaves_handle_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(401).body("unauthorized");
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    let err = auth.initialize().await.unwrap_err();

    assert!(matches!(err, AuthError::Load(_)));
    assert!(auth.handle().is_none());
}

#[tokio::test]
async fn get_user_before_initialize_is_not_initialized() {
    let server = MockServer::start_async().await;
    let users = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/user_1");
            then.status(200).json_body(json!({ "id": "user_1" }));
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    let err = auth.get_user("user_1").await.unwrap_err();

    assert!(matches!(err, AuthError::NotInitialized));
    users.assert_calls_async(0).await;
}

#[tokio::test]
async fn get_user_returns_profile_with_secret_key() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(200).json_body(json!({}));
        })
        .await;
    let users = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/users/user_1")
                .header("Authorization", "Bearer sk_test_secret");
            then.status(200).json_body(json!({
                "id": "user_1",
                "object": "user",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email_addresses": [{ "id": "idn_1", "email_address": "ada@example.com" }]
            }));
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    auth.initialize().await.expect("initialize");

    let user = auth
        .get_user("user_1")
        .await
        .expect("get_user")
        .expect("user exists");

    users.assert_async().await;
    assert_eq!(user.id, "user_1");
    assert_eq!(user.display_name(), "Ada Lovelace");
    assert_eq!(user.primary_email(), Some("ada@example.com"));
}

#[tokio::test]
async fn get_user_for_unknown_id_is_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(200).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/user_missing");
            then.status(404).json_body(json!({
                "errors": [{ "code": "resource_not_found" }]
            }));
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    auth.initialize().await.expect("initialize");

    let user = auth.get_user("user_missing").await.expect("get_user");
    assert!(user.is_none());
}

#[tokio::test]
async fn get_user_propagates_api_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/environment");
            then.status(200).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/users/user_1");
            then.status(500).body("boom");
        })
        .await;

    let auth = ClerkAuth::new(settings(&server));
    auth.initialize().await.expect("initialize");

    let err = auth.get_user("user_1").await.unwrap_err();
    assert!(matches!(err, AuthError::Api { status: 500, .. }));
}
