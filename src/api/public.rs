//! Public API types

use axum::Json;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use crate::error::ApiError;

/// Convert `ApiError` into an Axum compatible response. Every error leaves
/// through here, so this is also the single logging point for failures.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// JSON body extractor whose rejection (malformed body, missing required
/// field) comes back through the standard `{"error": ...}` envelope as a
/// 400 instead of axum's plain-text default.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

// Re-export public types from each route

pub mod events {
    pub use crate::api::routes::events::public::*;
}

pub mod todo {
    pub use crate::api::routes::todo::public::*;
}

pub mod todo_lists {
    pub use crate::api::routes::todo_lists::public::*;
}

pub mod todo_subtasks {
    pub use crate::api::routes::todo_subtasks::public::*;
}
