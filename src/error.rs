//! Typed error set shared by every layer of the facade.
//!
//! Validation failures are raised before any network call is made.
//! Repository errors bubble up unwrapped; anything unclassified is folded
//! into `Internal` so the original message survives for logging without
//! leaking a backtrace to the client.

use axum::extract::rejection::JsonRejection;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request data failed local validation.
    #[error("{0}")]
    Validation(String),

    /// Event end is not strictly after its start.
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),

    /// Recurrence parameters are inconsistent or out of range.
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),

    /// Resolution by name found zero matches.
    #[error("{resource} not found: {name}")]
    NotFound { resource: &'static str, name: String },

    /// Resolution by name matched more than one record. Duplicate display
    /// names make the (title, date) key ambiguous so we fail loudly rather
    /// than silently picking the first match.
    #[error("ambiguous {resource} name '{name}': {count} records match")]
    Ambiguous {
        resource: &'static str,
        name: String,
        count: usize,
    },

    /// Credential acquisition or token refresh failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The Graph API answered with a non-2xx status. The upstream status is
    /// carried verbatim and propagated to the client.
    #[error("graph api error ({status}): {message}")]
    External { status: u16, message: String },

    /// Anything unexpected on our side of the wire.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, name: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            name: name.into(),
        }
    }

    pub fn ambiguous(resource: &'static str, name: impl Into<String>, count: usize) -> Self {
        ApiError::Ambiguous {
            resource,
            name: name.into(),
            count,
        }
    }

    /// HTTP status for the client-facing response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidTimeRange(_)
            | ApiError::InvalidRecurrence(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Ambiguous { .. } => StatusCode::CONFLICT,
            ApiError::Auth(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Propagate the upstream status when it is a real error status,
            // otherwise fall back to 500.
            ApiError::External { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::External {
                status: 504,
                message: format!("graph api request timed out: {err}"),
            }
        } else if err.is_decode() {
            ApiError::Internal(format!("invalid graph api response: {err}"))
        } else {
            ApiError::External {
                status: 500,
                message: format!("graph api request failed: {err}"),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("unexpected graph api response shape: {err}"))
    }
}

/// A malformed or incomplete request body is always a 400.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_maps_validation_errors_to_400() {
        assert_eq!(
            ApiError::Validation("subject cannot be empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidRecurrence("interval must be >= 1".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidTimeRange("end before start".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn it_propagates_upstream_error_statuses() {
        let err = ApiError::External {
            status: 503,
            message: "service unavailable".into(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn it_does_not_propagate_success_statuses_from_upstream() {
        // A 2xx wrapped in External means something went sideways; never
        // answer an error with a success status.
        let err = ApiError::External {
            status: 200,
            message: "unexpected".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn it_maps_name_resolution_errors() {
        assert_eq!(
            ApiError::not_found("event", "Standup").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ambiguous("event", "Standup", 2).status_code(),
            StatusCode::CONFLICT
        );
    }
}
