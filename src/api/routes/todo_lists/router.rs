//! Router for the task lists API

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
use crate::todo::TodoListsManager;

type SharedState = Arc<RwLock<AppState>>;

fn manager(state: &SharedState) -> TodoListsManager {
    let graph = state.read().unwrap().graph.clone();
    TodoListsManager::new(graph)
}

async fn create_list(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::CreateListRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let list = manager(&state).create_list(&req.email, &req.list_name).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_lists(
    State(state): State<SharedState>,
    Query(params): Query<public::GetListsQuery>,
) -> Result<Json<public::ListsResponse>, ApiError> {
    let lists = manager(&state).get_lists(&params.email).await?;
    Ok(Json(public::ListsResponse { lists }))
}

async fn edit_list(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::EditListRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .rename_list(&req.email, &req.list_name, &req.new_name)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn delete_list(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::DeleteListRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state).delete_list(&req.email, &req.list_name).await?;
    Ok(Json(json!({ "success": true })))
}

/// Create the task lists router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(get_lists))
        .route("/create", post(create_list))
        .route("/edit", patch(edit_list))
        .route("/delete", delete(delete_list))
}
