//! Public types for the subtasks API

use serde::{Deserialize, Serialize};

use crate::todo::subtasks::ChecklistItemRecord;

#[derive(Debug, Deserialize)]
pub struct CreateSubtaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ListSubtasksQuery {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
}

#[derive(Debug, Deserialize)]
pub struct EditSubtaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(rename = "subtaskName")]
    pub subtask_name: String,
    #[serde(rename = "newTitle")]
    pub new_title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSubtaskRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    #[serde(rename = "subtaskName")]
    pub subtask_name: String,
}

#[derive(Serialize)]
pub struct SubtasksResponse {
    pub subtasks: Vec<ChecklistItemRecord>,
}
