//! Public types for the task lists API

use serde::{Deserialize, Serialize};

use crate::todo::lists::TodoListRecord;

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct GetListsQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct EditListRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
    #[serde(rename = "newName")]
    pub new_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteListRequest {
    pub email: String,
    #[serde(rename = "listName")]
    pub list_name: String,
}

#[derive(Serialize)]
pub struct ListsResponse {
    pub lists: Vec<TodoListRecord>,
}
