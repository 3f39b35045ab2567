//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use graph_relay::api::{AppState, app};
use graph_relay::core::AppConfig;

/// Creates a test application router wired to a mockito server standing in
/// for both the Graph API and the login endpoint. Tests that trigger
/// outbound calls must stub the token endpoint first via `token_mock`.
pub fn test_app(graph_url: &str) -> Router {
    let app_config = AppConfig {
        client_id: String::from("test-client"),
        client_secret: String::from("test-secret"),
        tenant_id: String::from("test-tenant"),
        graph_api_url: graph_url.to_string(),
        login_url: graph_url.to_string(),
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Stub the client-credentials token endpoint.
pub async fn token_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/test-tenant/oauth2/v2.0/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "test-token", "expires_in": 3600, "token_type": "Bearer"}"#)
        .create_async()
        .await
}

/// Stub the user lookup for `u@x.com` resolving to `u-1`.
pub async fn user_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/users")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"value": [{"id": "u-1"}]}"#)
        .create_async()
        .await
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf-8")
}
