//! Public types for the tasks API

use serde::{Deserialize, Serialize};

use crate::todo::tasks::TaskRecord;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(rename = "newTitle")]
    pub new_title: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskDescriptionRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskDueDateRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    /// Absent means clear the due date.
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub timezone: String,
}

#[derive(Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskRecord>,
}
