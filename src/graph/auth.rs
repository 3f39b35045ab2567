//! OAuth2 client-credential token acquisition with a process-wide cache.
//!
//! The cache is expiry-based only: a token is reused until it is close to
//! expiring and is never invalidated because a request failed. Concurrent
//! requests that observe an expired token each refresh independently, which
//! is wasteful but not unsafe since the last writer wins with a fresh token.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::core::AppConfig;
use crate::error::ApiError;

const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Refresh this long before the reported expiry so a token never goes stale
/// mid-request.
const EXPIRY_SKEW: Duration = Duration::from_secs(60);

/// Source of bearer tokens for Graph requests. Injected into the client so
/// tests can substitute a fixed token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Client-credential flow against the Microsoft identity platform.
pub struct ClientCredentials {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache: RwLock<Option<CachedToken>>,
}

impl ClientCredentials {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                config.login_url, config.tenant_id
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cache: RwLock::new(None),
        }
    }

    async fn acquire(&self) -> Result<TokenResponse, ApiError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_SCOPE),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|err| ApiError::Auth(format!("token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, "token acquisition failed");
            return Err(ApiError::Auth(format!(
                "token endpoint returned {status}: {text}"
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|err| ApiError::Auth(format!("invalid token response: {err}")))
    }
}

#[async_trait]
impl TokenProvider for ClientCredentials {
    async fn bearer_token(&self) -> Result<String, ApiError> {
        {
            let cached = self.cache.read().await;
            if let Some(token) = cached.as_ref()
                && token.is_fresh()
            {
                return Ok(token.token.clone());
            }
        }

        let response = self.acquire().await?;
        tracing::debug!(expires_in = response.expires_in, "acquired graph token");

        let expires_at = Instant::now()
            + Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_SKEW);
        let token = response.access_token;

        let mut cached = self.cache.write().await;
        *cached = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(login_url: &str) -> AppConfig {
        AppConfig {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            tenant_id: "test-tenant".to_string(),
            graph_api_url: "http://unused".to_string(),
            login_url: login_url.to_string(),
        }
    }

    #[tokio::test]
    async fn it_caches_tokens_until_expiry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/test-tenant/oauth2/v2.0/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok-1", "expires_in": 3600, "token_type": "Bearer"}"#)
            .expect(1)
            .create_async()
            .await;

        let provider = ClientCredentials::new(&test_config(&server.url()));
        assert_eq!(provider.bearer_token().await.unwrap(), "tok-1");
        // Second call must come from the cache.
        assert_eq!(provider.bearer_token().await.unwrap(), "tok-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_refreshes_an_expired_token() {
        let mut server = mockito::Server::new_async().await;
        // expires_in below the skew means the token is expired on arrival.
        let mock = server
            .mock("POST", "/test-tenant/oauth2/v2.0/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "tok-short", "expires_in": 10, "token_type": "Bearer"}"#)
            .expect(2)
            .create_async()
            .await;

        let provider = ClientCredentials::new(&test_config(&server.url()));
        assert_eq!(provider.bearer_token().await.unwrap(), "tok-short");
        assert_eq!(provider.bearer_token().await.unwrap(), "tok-short");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_surfaces_credential_failures_as_auth_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/test-tenant/oauth2/v2.0/token")
            .with_status(401)
            .with_body(r#"{"error": "invalid_client"}"#)
            .create_async()
            .await;

        let provider = ClientCredentials::new(&test_config(&server.url()));
        let err = provider.bearer_token().await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(_)));
    }
}
