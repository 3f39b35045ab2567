//! To Do task lists: data access and name-based management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::validate;
use crate::error::ApiError;
use crate::graph::types::Page;
use crate::graph::{GraphClient, UserRepository, urls};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListRecord {
    pub id: String,
    pub display_name: String,
}

pub struct TodoListsRepository {
    graph: Arc<GraphClient>,
}

impl TodoListsRepository {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    pub async fn list_lists(&self, user_id: &str) -> Result<Vec<TodoListRecord>, ApiError> {
        let value = self.graph.get(&urls::todo_lists(user_id)).await?;
        let page: Page<TodoListRecord> = serde_json::from_value(value)?;
        Ok(page.value)
    }

    pub async fn create_list(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<TodoListRecord, ApiError> {
        let value = self
            .graph
            .post(&urls::todo_lists(user_id), &json!({ "displayName": name }))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn rename_list(
        &self,
        user_id: &str,
        list_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(
                &urls::todo_list(user_id, list_id),
                &json!({ "displayName": name }),
            )
            .await
    }

    pub async fn delete_list(&self, user_id: &str, list_id: &str) -> Result<(), ApiError> {
        self.graph.delete(&urls::todo_list(user_id, list_id)).await
    }

    /// Resolve a list by display name, case-insensitively. Duplicate names
    /// fail with an ambiguity error rather than picking one at random.
    pub async fn find_list(&self, user_id: &str, name: &str) -> Result<TodoListRecord, ApiError> {
        let lists = self.list_lists(user_id).await?;
        let mut matches: Vec<TodoListRecord> = lists
            .into_iter()
            .filter(|list| list.display_name.eq_ignore_ascii_case(name))
            .collect();
        match matches.len() {
            0 => Err(ApiError::not_found("todo list", name)),
            1 => Ok(matches.remove(0)),
            count => Err(ApiError::ambiguous("todo list", name, count)),
        }
    }
}

pub struct TodoListsManager {
    users: UserRepository,
    repo: TodoListsRepository,
}

impl TodoListsManager {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self {
            users: UserRepository::new(graph.clone()),
            repo: TodoListsRepository::new(graph),
        }
    }

    pub async fn create_list(
        &self,
        user_email: &str,
        name: &str,
    ) -> Result<TodoListRecord, ApiError> {
        let name = validate::non_empty(name, "listName")?;
        let user_id = self.users.resolve_user_id(user_email).await?;
        tracing::debug!(user_id, list = %name, "creating todo list");
        self.repo.create_list(&user_id, &name).await
    }

    pub async fn get_lists(&self, user_email: &str) -> Result<Vec<TodoListRecord>, ApiError> {
        let user_id = self.users.resolve_user_id(user_email).await?;
        self.repo.list_lists(&user_id).await
    }

    pub async fn rename_list(
        &self,
        user_email: &str,
        name: &str,
        new_name: &str,
    ) -> Result<(), ApiError> {
        let new_name = validate::non_empty(new_name, "newName")?;
        let user_id = self.users.resolve_user_id(user_email).await?;
        let list = self.repo.find_list(&user_id, name).await?;
        self.repo.rename_list(&user_id, &list.id, &new_name).await
    }

    pub async fn delete_list(&self, user_email: &str, name: &str) -> Result<(), ApiError> {
        let user_id = self.users.resolve_user_id(user_email).await?;
        let list = self.repo.find_list(&user_id, name).await?;
        tracing::debug!(user_id, list_id = %list.id, "deleting todo list");
        self.repo.delete_list(&user_id, &list.id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::graph::auth::TokenProvider;

    struct StaticToken;

    #[async_trait]
    impl TokenProvider for StaticToken {
        async fn bearer_token(&self) -> Result<String, ApiError> {
            Ok("test-token".to_string())
        }
    }

    fn repo(url: &str) -> TodoListsRepository {
        TodoListsRepository::new(Arc::new(GraphClient::new(
            url.to_string(),
            Arc::new(StaticToken),
        )))
    }

    fn lists_mock(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/users/u-1/todo/lists")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    #[tokio::test]
    async fn it_finds_a_list_case_insensitively() {
        let mut server = mockito::Server::new_async().await;
        lists_mock(
            &mut server,
            r#"{"value": [
                {"id": "l-1", "displayName": "Groceries"},
                {"id": "l-2", "displayName": "Work"}
            ]}"#,
        );

        let list = repo(&server.url()).find_list("u-1", "groceries").await.unwrap();
        assert_eq!(list.id, "l-1");
    }

    #[tokio::test]
    async fn it_fails_with_not_found_for_an_unknown_list() {
        let mut server = mockito::Server::new_async().await;
        lists_mock(&mut server, r#"{"value": []}"#);

        let err = repo(&server.url()).find_list("u-1", "Groceries").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: "todo list", .. }));
    }

    #[tokio::test]
    async fn it_fails_with_ambiguous_for_duplicate_list_names() {
        let mut server = mockito::Server::new_async().await;
        lists_mock(
            &mut server,
            r#"{"value": [
                {"id": "l-1", "displayName": "Groceries"},
                {"id": "l-2", "displayName": "groceries"}
            ]}"#,
        );

        let err = repo(&server.url()).find_list("u-1", "Groceries").await.unwrap_err();
        assert!(matches!(err, ApiError::Ambiguous { count: 2, .. }));
    }

    #[tokio::test]
    async fn it_creates_a_list_with_the_display_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/users/u-1/todo/lists")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "displayName": "Groceries" }),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "l-1", "displayName": "Groceries"}"#)
            .create_async()
            .await;

        let list = repo(&server.url()).create_list("u-1", "Groceries").await.unwrap();
        assert_eq!(list.id, "l-1");
        assert_eq!(list.display_name, "Groceries");
    }
}
