//! Email to Graph user-id resolution.

use std::sync::Arc;

use serde::Deserialize;

use super::client::GraphClient;
use super::types::Page;
use super::urls;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
}

pub struct UserRepository {
    graph: Arc<GraphClient>,
}

impl UserRepository {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    /// Resolve a mail address to the Graph user id. Re-queried on every
    /// request; user ids are stable but accounts come and go.
    pub async fn resolve_user_id(&self, email: &str) -> Result<String, ApiError> {
        let value = self.graph.get(&urls::users_by_mail(email)).await?;
        let page: Page<UserRecord> = serde_json::from_value(value)?;
        page.value
            .into_iter()
            .next()
            .map(|user| user.id)
            .ok_or_else(|| ApiError::not_found("user", email))
    }
}
