//! Router for the subtasks API

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
use crate::todo::SubtasksManager;

type SharedState = Arc<RwLock<AppState>>;

fn manager(state: &SharedState) -> SubtasksManager {
    let graph = state.read().unwrap().graph.clone();
    SubtasksManager::new(graph)
}

async fn create_subtask(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::CreateSubtaskRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let subtask = manager(&state)
        .create_subtask(&req.email, &req.list_name, &req.task_name, &req.title)
        .await?;
    Ok((StatusCode::CREATED, Json(subtask)))
}

async fn list_subtasks(
    State(state): State<SharedState>,
    Query(params): Query<public::ListSubtasksQuery>,
) -> Result<Json<public::SubtasksResponse>, ApiError> {
    let subtasks = manager(&state)
        .get_subtasks(&params.email, &params.list_name, &params.task_name)
        .await?;
    Ok(Json(public::SubtasksResponse { subtasks }))
}

async fn edit_subtask(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::EditSubtaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .edit_subtask(
            &req.email,
            &req.list_name,
            &req.task_name,
            &req.subtask_name,
            req.new_title.as_deref(),
            req.completed,
        )
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn delete_subtask(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::DeleteSubtaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .delete_subtask(&req.email, &req.list_name, &req.task_name, &req.subtask_name)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// Create the subtasks router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_subtasks))
        .route("/create", post(create_subtask))
        .route("/edit", patch(edit_subtask))
        .route("/delete", delete(delete_subtask))
}
