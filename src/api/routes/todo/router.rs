//! Router for the tasks API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::Query;
use http::StatusCode;
use serde_json::json;

use super::public;
use crate::api::public::{ApiError, ApiJson};
use crate::api::state::AppState;
use crate::todo::TasksManager;

type SharedState = Arc<RwLock<AppState>>;

fn manager(state: &SharedState) -> TasksManager {
    let graph = state.read().unwrap().graph.clone();
    TasksManager::new(graph)
}

async fn create_task(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::CreateTaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let task = manager(&state)
        .create_task(
            &req.email,
            &req.list_name,
            &req.title,
            req.description.as_deref(),
            req.due_date.as_deref(),
            req.timezone.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<public::ListTasksQuery>,
) -> Result<Json<public::TasksResponse>, ApiError> {
    let tasks = manager(&state)
        .get_tasks(&params.email, &params.list_name)
        .await?;
    Ok(Json(public::TasksResponse { tasks }))
}

async fn edit_task(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::EditTaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .edit_task(&req.email, &req.list_name, &req.task_name, &req.new_title)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn delete_task(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::DeleteTaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .delete_task(&req.email, &req.list_name, &req.task_name)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn set_status(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::TaskStatusRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .set_status(&req.email, &req.list_name, &req.task_name, &req.status)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn set_description(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::TaskDescriptionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .set_description(&req.email, &req.list_name, &req.task_name, &req.description)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn set_due_date(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::TaskDueDateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .set_due_date(
            &req.email,
            &req.list_name,
            &req.task_name,
            req.due_date.as_deref(),
            &req.timezone,
        )
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// Create the tasks router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/create", post(create_task))
        .route("/items", get(list_tasks))
        .route("/edit", patch(edit_task))
        .route("/delete", delete(delete_task))
        .route("/status", patch(set_status))
        .route("/description", patch(set_description))
        .route("/duedate", patch(set_due_date))
}
