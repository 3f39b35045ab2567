//! Router for the events API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{delete, post, put},
};
use http::StatusCode;
use serde_json::json;

use super::public::{self, CreateEventKind};
use crate::api::public::{ApiError, ApiJson};
use crate::api::state::AppState;
use crate::events::EventsManager;
use crate::events::manager::NewEvent;

type SharedState = Arc<RwLock<AppState>>;

fn manager(state: &SharedState) -> EventsManager {
    let graph = state.read().unwrap().graph.clone();
    EventsManager::new(graph)
}

async fn create_event(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = req.kind()?;
    let event = NewEvent {
        user_email: req.user_email,
        subject: req.subject,
        description: req.description,
        content_type: req.content_type,
        location: req.location,
        attendees: req.attendees,
        timezone: req.timezone,
        start_time: req.start_time,
        end_time: req.end_time,
    };

    let manager = manager(&state);
    let record = match kind {
        CreateEventKind::OneTime { date } => {
            manager.create_one_time_event(&event, &date).await?
        }
        CreateEventKind::Daily {
            start_date,
            end_date,
            interval,
        } => {
            manager
                .create_daily_recurring_event(&event, &start_date, &end_date, interval)
                .await?
        }
        CreateEventKind::Weekly {
            start_date,
            end_date,
            interval,
            days_of_week,
        } => {
            manager
                .create_weekly_recurring_event(
                    &event,
                    &start_date,
                    &end_date,
                    interval,
                    &days_of_week,
                )
                .await?
        }
        CreateEventKind::Monthly {
            start_date,
            end_date,
            interval,
            day_of_month,
        } => {
            manager
                .create_monthly_recurring_event(
                    &event,
                    &start_date,
                    &end_date,
                    interval,
                    day_of_month,
                )
                .await?
        }
        CreateEventKind::Yearly {
            start_date,
            end_date,
            interval,
            day_of_month,
            month,
        } => {
            manager
                .create_yearly_recurring_event(
                    &event,
                    &start_date,
                    &end_date,
                    interval,
                    day_of_month,
                    month,
                )
                .await?
        }
        CreateEventKind::Recurring(recurrence) => {
            let start_date = recurrence.range.start_date.clone();
            manager
                .create_recurring_event(&event, &start_date, recurrence)
                .await?
        }
    };

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_events(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::GetEventsRequest>,
) -> Result<Json<public::EventsResponse>, ApiError> {
    let events = manager(&state)
        .get_events_by_date(&req.user_email, &req.date, &req.timezone)
        .await?;
    Ok(Json(public::EventsResponse { events }))
}

/// Apply the requested edits one field at a time, in a fixed order. A
/// failure part-way through leaves the earlier edits in place, so the error
/// response reports which fields were already applied.
async fn edit_event(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::EditEventRequest>,
) -> Response {
    match apply_edits(&state, req).await {
        Ok(applied) => Json(json!({ "success": true, "applied": applied })).into_response(),
        Err((err, applied)) => {
            let status = err.status_code();
            if status.is_server_error() {
                tracing::error!("event edit failed: {}", err);
            } else {
                tracing::warn!("event edit rejected: {}", err);
            }
            (
                status,
                Json(json!({ "error": err.to_string(), "applied": applied })),
            )
                .into_response()
        }
    }
}

enum AttendeeAction {
    Add,
    Replace,
}

async fn apply_edits(
    state: &SharedState,
    req: public::EditEventRequest,
) -> Result<Vec<&'static str>, (ApiError, Vec<&'static str>)> {
    let wants_datetime = req.start_time.is_some()
        || req.end_time.is_some()
        || req.start_date.is_some()
        || req.end_date.is_some();
    let wants_any = req.subject.is_some()
        || req.description.is_some()
        || wants_datetime
        || req.attendees.is_some()
        || req.location.is_some();
    if !wants_any {
        return Err((
            ApiError::Validation("at least one field to edit is required".into()),
            vec![],
        ));
    }
    if wants_datetime && (req.start_time.is_none() || req.end_time.is_none()) {
        return Err((
            ApiError::Validation("rescheduling requires both startTime and endTime".into()),
            vec![],
        ));
    }
    let attendee_action = match req.attendee_action.as_deref() {
        None | Some("add") => AttendeeAction::Add,
        Some("replace") => AttendeeAction::Replace,
        Some(other) => {
            return Err((
                ApiError::Validation(format!(
                    "attendeeAction must be 'add' or 'replace', got '{other}'"
                )),
                vec![],
            ));
        }
    };

    let manager = manager(state);
    let mut applied: Vec<&'static str> = Vec::new();
    // Subsequent edits must look the event up under its new subject once a
    // rename has gone through.
    let mut title = req.title.clone();

    if let Some(subject) = &req.subject {
        manager
            .edit_event_subject(&req.user_email, &title, &req.date, &req.timezone, subject)
            .await
            .map_err(|err| (err, applied.clone()))?;
        applied.push("subject");
        title = subject.clone();
    }

    if let Some(description) = &req.description {
        manager
            .edit_event_description(
                &req.user_email,
                &title,
                &req.date,
                &req.timezone,
                description,
                req.content_type.as_deref(),
            )
            .await
            .map_err(|err| (err, applied.clone()))?;
        applied.push("description");
    }

    if wants_datetime {
        manager
            .edit_event_datetime(
                &req.user_email,
                &title,
                &req.date,
                &req.timezone,
                req.start_date.as_deref(),
                req.end_date.as_deref(),
                req.start_time.as_deref().unwrap_or_default(),
                req.end_time.as_deref().unwrap_or_default(),
            )
            .await
            .map_err(|err| (err, applied.clone()))?;
        applied.push("datetime");
    }

    // A reschedule above may have moved the event to a new day.
    let lookup_date = req.start_date.as_deref().unwrap_or(&req.date);

    if let Some(location) = &req.location {
        manager
            .edit_event_location(&req.user_email, &title, lookup_date, &req.timezone, location)
            .await
            .map_err(|err| (err, applied.clone()))?;
        applied.push("location");
    }

    if let Some(attendees) = &req.attendees {
        match attendee_action {
            AttendeeAction::Add => manager
                .add_attendees(&req.user_email, &title, lookup_date, &req.timezone, attendees)
                .await
                .map_err(|err| (err, applied.clone()))?,
            AttendeeAction::Replace => manager
                .modify_attendees(&req.user_email, &title, lookup_date, &req.timezone, attendees)
                .await
                .map_err(|err| (err, applied.clone()))?,
        }
        applied.push("attendees");
    }

    Ok(applied)
}

async fn delete_event(
    State(state): State<SharedState>,
    ApiJson(req): ApiJson<public::DeleteEventRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    manager(&state)
        .delete_event(&req.user_email, &req.title, &req.date, &req.timezone)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/create", post(create_event))
        .route("/get", post(get_events))
        .route("/edit", put(edit_event))
        .route("/delete", delete(delete_event))
}
