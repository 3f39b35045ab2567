//! To Do tasks within a named list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::lists::TodoListsRepository;
use crate::core::time::parse_date;
use crate::core::validate;
use crate::error::ApiError;
use crate::graph::types::{DateTimeZone, ItemBody, Page};
use crate::graph::{GraphClient, UserRepository, urls};

/// Task statuses the Graph API accepts, in their canonical casing.
const TASK_STATUSES: [&str; 5] = [
    "notStarted",
    "inProgress",
    "completed",
    "waitingOnOthers",
    "deferred",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    pub body: Option<ItemBody>,
    pub due_date_time: Option<DateTimeZone>,
    pub created_date_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<DateTimeZone>,
}

pub struct TasksRepository {
    graph: Arc<GraphClient>,
}

impl TasksRepository {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    pub async fn list_tasks(
        &self,
        user_id: &str,
        list_id: &str,
    ) -> Result<Vec<TaskRecord>, ApiError> {
        let value = self.graph.get(&urls::todo_tasks(user_id, list_id)).await?;
        let page: Page<TaskRecord> = serde_json::from_value(value)?;
        Ok(page.value)
    }

    pub async fn create_task(
        &self,
        user_id: &str,
        list_id: &str,
        payload: &TaskPayload,
    ) -> Result<TaskRecord, ApiError> {
        let body = serde_json::to_value(payload)?;
        let value = self
            .graph
            .post(&urls::todo_tasks(user_id, list_id), &body)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Resolve a task by title, case-insensitively; duplicates are an error.
    pub async fn find_task(
        &self,
        user_id: &str,
        list_id: &str,
        title: &str,
    ) -> Result<TaskRecord, ApiError> {
        let tasks = self.list_tasks(user_id, list_id).await?;
        let mut matches: Vec<TaskRecord> = tasks
            .into_iter()
            .filter(|task| task.title.eq_ignore_ascii_case(title))
            .collect();
        match matches.len() {
            0 => Err(ApiError::not_found("task", title)),
            1 => Ok(matches.remove(0)),
            count => Err(ApiError::ambiguous("task", title, count)),
        }
    }

    pub async fn update_task(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
        patch: &serde_json::Value,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(&urls::todo_task(user_id, list_id, task_id), patch)
            .await
    }

    pub async fn delete_task(
        &self,
        user_id: &str,
        list_id: &str,
        task_id: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .delete(&urls::todo_task(user_id, list_id, task_id))
            .await
    }
}

pub struct TasksManager {
    users: UserRepository,
    lists: TodoListsRepository,
    repo: TasksRepository,
}

impl TasksManager {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self {
            users: UserRepository::new(graph.clone()),
            lists: TodoListsRepository::new(graph.clone()),
            repo: TasksRepository::new(graph),
        }
    }

    pub async fn create_task(
        &self,
        user_email: &str,
        list_name: &str,
        title: &str,
        description: Option<&str>,
        due_date: Option<&str>,
        timezone: Option<&str>,
    ) -> Result<TaskRecord, ApiError> {
        let title = validate::non_empty(title, "title")?;
        let due_date_time = due_date
            .map(|date| due_date_time(date, timezone.unwrap_or("UTC")))
            .transpose()?;
        let payload = TaskPayload {
            title,
            body: description.map(ItemBody::text),
            due_date_time,
        };

        let (user_id, list_id) = self.locate_list(user_email, list_name).await?;
        tracing::debug!(user_id, list_id, title = %payload.title, "creating task");
        self.repo.create_task(&user_id, &list_id, &payload).await
    }

    pub async fn get_tasks(
        &self,
        user_email: &str,
        list_name: &str,
    ) -> Result<Vec<TaskRecord>, ApiError> {
        let (user_id, list_id) = self.locate_list(user_email, list_name).await?;
        self.repo.list_tasks(&user_id, &list_id).await
    }

    /// Rename a task.
    pub async fn edit_task(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        new_title: &str,
    ) -> Result<(), ApiError> {
        let new_title = validate::non_empty(new_title, "newTitle")?;
        let (user_id, list_id, task) = self.locate_task(user_email, list_name, task_name).await?;
        self.repo
            .update_task(&user_id, &list_id, &task.id, &json!({ "title": new_title }))
            .await
    }

    pub async fn set_status(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        status: &str,
    ) -> Result<(), ApiError> {
        let status = canonical_status(status)?;
        let (user_id, list_id, task) = self.locate_task(user_email, list_name, task_name).await?;
        self.repo
            .update_task(&user_id, &list_id, &task.id, &json!({ "status": status }))
            .await
    }

    pub async fn set_description(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        description: &str,
    ) -> Result<(), ApiError> {
        let (user_id, list_id, task) = self.locate_task(user_email, list_name, task_name).await?;
        let patch = json!({ "body": serde_json::to_value(ItemBody::text(description))? });
        self.repo
            .update_task(&user_id, &list_id, &task.id, &patch)
            .await
    }

    /// Set or, when no date is given, clear a task's due date.
    pub async fn set_due_date(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
        due_date: Option<&str>,
        timezone: &str,
    ) -> Result<(), ApiError> {
        let due = match due_date {
            Some(date) => serde_json::to_value(due_date_time(date, timezone)?)?,
            None => serde_json::Value::Null,
        };
        let (user_id, list_id, task) = self.locate_task(user_email, list_name, task_name).await?;
        self.repo
            .update_task(&user_id, &list_id, &task.id, &json!({ "dueDateTime": due }))
            .await
    }

    pub async fn delete_task(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
    ) -> Result<(), ApiError> {
        let (user_id, list_id, task) = self.locate_task(user_email, list_name, task_name).await?;
        tracing::debug!(user_id, list_id, task_id = %task.id, "deleting task");
        self.repo.delete_task(&user_id, &list_id, &task.id).await
    }

    async fn locate_list(
        &self,
        user_email: &str,
        list_name: &str,
    ) -> Result<(String, String), ApiError> {
        let user_id = self.users.resolve_user_id(user_email).await?;
        let list = self.lists.find_list(&user_id, list_name).await?;
        Ok((user_id, list.id))
    }

    async fn locate_task(
        &self,
        user_email: &str,
        list_name: &str,
        task_name: &str,
    ) -> Result<(String, String, TaskRecord), ApiError> {
        let (user_id, list_id) = self.locate_list(user_email, list_name).await?;
        let task = self.repo.find_task(&user_id, &list_id, task_name).await?;
        Ok((user_id, list_id, task))
    }
}

/// Map a loosely-written status ("in-progress", "Not Started") onto the
/// Graph enumeration, rejecting anything outside it.
pub(crate) fn canonical_status(value: &str) -> Result<String, ApiError> {
    let normalized: String = value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    TASK_STATUSES
        .iter()
        .find(|status| status.to_ascii_lowercase() == normalized)
        .map(|status| status.to_string())
        .ok_or_else(|| {
            ApiError::Validation(format!(
                "status must be one of {}; got '{value}'",
                TASK_STATUSES.join(", ")
            ))
        })
}

/// Due dates carry no time of day; Graph expects a midnight timestamp.
fn due_date_time(date: &str, timezone: &str) -> Result<DateTimeZone, ApiError> {
    let date = parse_date(date)?;
    Ok(DateTimeZone::new(
        format!("{}T00:00:00", date.format("%Y-%m-%d")),
        timezone,
    ))
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

    fn repo(url: &str) -> TasksRepository {
        TasksRepository::new(Arc::new(GraphClient::new(
            url.to_string(),
            Arc::new(StaticToken),
        )))
    }

    #[test]
    fn it_canonicalizes_status_spellings() {
        assert_eq!(canonical_status("not-started").unwrap(), "notStarted");
        assert_eq!(canonical_status("In Progress").unwrap(), "inProgress");
        assert_eq!(canonical_status("COMPLETED").unwrap(), "completed");
        assert_eq!(canonical_status("waitingOnOthers").unwrap(), "waitingOnOthers");
        assert_eq!(canonical_status("deferred").unwrap(), "deferred");
    }

    #[test]
    fn it_rejects_unknown_statuses() {
        let err = canonical_status("done").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn it_normalizes_due_dates_to_midnight() {
        let due = due_date_time("07/04/2025", "UTC").unwrap();
        assert_eq!(due.date_time, "2025-07-04T00:00:00");
        assert_eq!(due.time_zone, "UTC");
        assert!(due_date_time("not a date", "UTC").is_err());
    }

    #[test]
    fn it_serializes_the_create_payload_without_empty_fields() {
        let payload = TaskPayload {
            title: "Buy milk".to_string(),
            body: None,
            due_date_time: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Buy milk" }));
    }

    #[tokio::test]
    async fn it_finds_a_task_by_title_case_insensitively() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/u-1/todo/lists/l-1/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value": [
                    {"id": "t-1", "title": "Buy milk", "status": "notStarted"},
                    {"id": "t-2", "title": "Walk dog", "status": "completed"}
                ]}"#,
            )
            .create_async()
            .await;

        let task = repo(&server.url())
            .find_task("u-1", "l-1", "buy milk")
            .await
            .unwrap();
        assert_eq!(task.id, "t-1");
        assert_eq!(task.status.as_deref(), Some("notStarted"));
    }

    #[tokio::test]
    async fn it_fails_with_not_found_for_an_unknown_task() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/users/u-1/todo/lists/l-1/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": []}"#)
            .create_async()
            .await;

        let err = repo(&server.url())
            .find_task("u-1", "l-1", "Buy milk")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource: "task", .. }));
    }
}
