//! Checklist items (subtasks) nested under a named task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::lists::TodoListsRepository;
use super::tasks::TasksRepository;
use crate::core::validate;
use crate::error::ApiError;
use crate::graph::types::Page;
use crate::graph::{GraphClient, UserRepository, urls};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemRecord {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_checked: bool,
    pub created_date_time: Option<String>,
}

pub struct SubtasksRepository {
    graph: Arc<GraphClient>,
}

impl SubtasksRepository {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    pub async fn list_items(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
    ) -> Result<Vec<ChecklistItemRecord>, ApiError> {
        let value = self
            .graph
            .get(&urls::checklist_items(user_id, list_id, task_id))
            .await?;
        let page: Page<ChecklistItemRecord> = serde_json::from_value(value)?;
        Ok(page.value)
    }

    pub async fn create_item(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        name: &str,
    ) -> Result<ChecklistItemRecord, ApiError> {
        let value = self
            .graph
            .post(
                &urls::checklist_items(user_id, list_id, task_id),
                &json!({ "displayName": name }),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve a checklist item by display name, case-insensitively;
    /// duplicates are an error.
    pub async fn find_item(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        name: &str,
    ) -> Result<ChecklistItemRecord, ApiError> {
        let items = self.list_items(user_id, list_id, task_id).await?;
        let mut matches: Vec<ChecklistItemRecord> = items
            .into_iter()
            .filter(|item| item.display_name.eq_ignore_ascii_case(name))
            .collect();
        match matches.len() {
            0 => Err(ApiError::not_found("subtask", name)),
            1 => Ok(matches.remove(0)),
            count => Err(ApiError::ambiguous("subtask", name, count)),
        }
    }

    pub async fn update_item(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        item_id: &str,
        patch: &serde_json::Value,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(&urls::checklist_item(user_id, list_id, task_id, item_id), patch)
            .await
    }

    pub async fn delete_item(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        item_id: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .delete(&urls::checklist_item(user_id, list_id, task_id, item_id))
            .await
    }
}

pub struct SubtasksManager {
    users: UserRepository,
    lists: TodoListsRepository,
    tasks: TasksRepository,
    repo: SubtasksRepository,
}

impl SubtasksManager {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self {
            users: UserRepository::new(graph.clone()),
            lists: TodoListsRepository::new(graph.clone()),
            tasks: TasksRepository::new(graph.clone()),
            repo: SubtasksRepository::new(graph),
        }
    }

    pub async fn create_subtask(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        name: &str,
    ) -> Result<ChecklistItemRecord, ApiError> {
        let name = validate::non_empty(name, "subtaskName")?;
        let (user_id, list_id, task_id) =
            self.locate_task(user_email, list_name, task_name).await?;
        tracing::debug!(user_id, task_id, subtask = %name, "creating subtask");
        self.repo
            .create_item(&user_id, &list_id, &task_id, &name)
            .await
    }

    pub async fn get_subtasks(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
    ) -> Result<Vec<ChecklistItemRecord>, ApiError> {
        let (user_id, list_id, task_id) =
            self.locate_task(user_email, list_name, task_name).await?;
        self.repo.list_items(&user_id, &list_id, &task_id).await
    }

    /// Rename a subtask, mark it complete or incomplete, or both in one
    /// call. At least one change must be requested.
    pub async fn edit_subtask(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        subtask_name: &str,
        new_title: Option<&str>,
        completed: Option<bool>,
    ) -> Result<(), ApiError> {
        if new_title.is_none() && completed.is_none() {
            return Err(ApiError::Validation(
                "at least one of newTitle or completed is required".into(),
            ));
        }
        let mut patch = serde_json::Map::new();
        if let Some(title) = new_title {
            let title = validate::non_empty(title, "newTitle")?;
            patch.insert("displayName".to_string(), json!(title));
        }
        if let Some(checked) = completed {
            patch.insert("isChecked".to_string(), json!(checked));
        }

        let (user_id, list_id, task_id) =
            self.locate_task(user_email, list_name, task_name).await?;
        let item = self
            .repo
            .find_item(&user_id, &list_id, &task_id, subtask_name)
            .await?;
        self.repo
            .update_item(&user_id, &list_id, &task_id, &item.id, &patch.into())
            .await
    }

    pub async fn delete_subtask(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        subtask_name: &str,
    ) -> Result<(), ApiError> {
        let (user_id, list_id, task_id) =
            self.locate_task(user_email, list_name, task_name).await?;
        let item = self
            .repo
            .find_item(&user_id, &list_id, &task_id, subtask_name)
            .await?;
        tracing::debug!(user_id, task_id, item_id = %item.id, "deleting subtask");
        self.repo
            .delete_item(&user_id, &list_id, &task_id, &item.id)
            .await
    }

    async fn locate_task(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
    ) -> Result<(String, String, String), ApiError> {
        let user_id = self.users.resolve_user_id(user_email).await?;
        let list = self.lists.find_list(&user_id, list_name).await?;
        let task = self.tasks.find_task(&user_id, &list.id, task_name).await?;
        Ok((user_id, list.id, task.id))
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

    fn repo(url: &str) -> SubtasksRepository {
        SubtasksRepository::new(Arc::new(GraphClient::new(
            url.to_string(),
            Arc::new(StaticToken),
        )))
    }

    const ITEMS_PATH: &str = "/users/u-1/todo/lists/l-1/tasks/t-1/checklistItems";

    #[tokio::test]
    async fn it_finds_a_subtask_by_display_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", ITEMS_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value": [
                    {"id": "s-1", "displayName": "Whole milk", "isChecked": false},
                    {"id": "s-2", "displayName": "Oat milk", "isChecked": true}
                ]}"#,
            )
            .create_async()
            .await;

        let item = repo(&server.url())
            .find_item("u-1", "l-1", "t-1", "oat milk")
            .await
            .unwrap();
        assert_eq!(item.id, "s-2");
        assert!(item.is_checked);
    }

    #[tokio::test]
    async fn it_fails_with_not_found_for_an_unknown_subtask() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", ITEMS_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": []}"#)
            .create_async()
            .await;

        let err = repo(&server.url())
            .find_item("u-1", "l-1", "t-1", "Whole milk")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: "subtask", .. }));
    }

    #[tokio::test]
    async fn it_patches_the_checked_flag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/users/u-1/todo/lists/l-1/tasks/t-1/checklistItems/s-1")
            .match_body(mockito::Matcher::Json(json!({ "isChecked": true })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "s-1", "displayName": "Whole milk", "isChecked": true}"#)
            .create_async()
            .await;

        repo(&server.url())
            .update_item("u-1", "l-1", "t-1", "s-1", &json!({ "isChecked": true }))
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
