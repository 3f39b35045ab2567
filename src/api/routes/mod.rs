//! API routes module

pub mod events;
pub mod todo;
pub mod todo_lists;
pub mod todo_subtasks;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Calendar event routes
        .nest("/events", events::router())
        // Task list routes
        .nest("/todo/lists", todo_lists::router())
        // Checklist item routes
        .nest("/todo/subtasks", todo_subtasks::router())
        // Task routes
        .nest("/todo", todo::router())
}
