//! Generic authenticated HTTP client for the Graph API.
//!
//! One method does the work: attach the bearer token, issue the call, and
//! either hand back parsed JSON or classify the failure. There is no retry
//! or backoff; a transient upstream failure surfaces to the caller
//! unchanged, status intact.

use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use reqwest::{Client, Method};
use serde_json::Value;

use super::auth::TokenProvider;
use crate::error::ApiError;

/// Fixed per-call timeout; expiry surfaces as an `External` error with a
/// 504 status.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GraphClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl GraphClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build http client");
        Self {
            http,
            base_url: base_url.into(),
            tokens,
        }
    }

    /// Issue an authenticated request. Returns `None` for 204 No Content,
    /// which Graph answers to DELETE and PATCH calls.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        timezone: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let token = self.tokens.bearer_token().await?;
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url).bearer_auth(&token);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(tz) = timezone {
            // Ask Graph to localize event times to the caller's zone.
            request = request.header("Prefer", format!(r#"outlook.timezone="{tz}""#));
        }

        tracing::debug!(%method, path, "graph api request");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&text).unwrap_or(text);
            tracing::error!(%status, %message, path, "graph api error");
            return Err(ApiError::External {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.expect_body(self.request(Method::GET, path, None, None).await?)
    }

    /// GET with a `Prefer: outlook.timezone` header so date-times in the
    /// response are expressed in the given zone.
    pub async fn get_in_timezone(&self, path: &str, timezone: &str) -> Result<Value, ApiError> {
        self.expect_body(
            self.request(Method::GET, path, None, Some(timezone))
                .await?,
        )
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.expect_body(self.request(Method::POST, path, Some(body), None).await?)
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.request(Method::PATCH, path, Some(body), None).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    fn expect_body(&self, value: Option<Value>) -> Result<Value, ApiError> {
        value.ok_or_else(|| ApiError::Internal("graph api returned an empty response".to_string()))
    }
}

/// Pull the human-readable message out of a Graph error envelope
/// (`{"error": {"code": ..., "message": ...}}`) when there is one.
fn extract_error_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
