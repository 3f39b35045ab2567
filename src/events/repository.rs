//! Data access for calendar events via the Graph API.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use super::types::{Attendee, DateTimePatch, EventPayload, EventRecord};
use crate::core::time::day_window;
use crate::error::ApiError;
use crate::graph::types::Page;
use crate::graph::{GraphClient, urls};

pub struct EventsRepository {
    graph: Arc<GraphClient>,
}

impl EventsRepository {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }

    pub async fn create_event(
        &self,
        user_id: &str,
        payload: &EventPayload,
    ) -> Result<EventRecord, ApiError> {
        let body = serde_json::to_value(payload)?;
        let value = self
            .graph
            .post(&urls::calendar_events(user_id), &body)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// All event occurrences in the `[date 00:00, date 24:00)` window,
    /// with times localized to the given zone.
    pub async fn events_on_date(
        &self,
        user_id: &str,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<Vec<EventRecord>, ApiError> {
        let (start, end) = day_window(date)?;
        let value = self
            .graph
            .get_in_timezone(&urls::calendar_view(user_id, &start, &end), timezone)
            .await?;
        let page: Page<EventRecord> = serde_json::from_value(value)?;
        Ok(page.value)
    }

    /// Resolve an event by title within a single day. Subject comparison is
    /// case-insensitive. Zero matches fail with not-found; more than one
    /// distinct match fails with an ambiguity error rather than silently
    /// picking one.
    pub async fn find_event(
        &self,
        user_id: &str,
        title: &str,
        date: NaiveDate,
        timezone: &str,
    ) -> Result<EventRecord, ApiError> {
        let events = self.events_on_date(user_id, date, timezone).await?;

        let mut matches: Vec<EventRecord> = events
            .into_iter()
            .filter(|event| {
                event
                    .subject
                    .as_deref()
                    .is_some_and(|subject| subject.eq_ignore_ascii_case(title))
            })
            .collect();

        // A recurring series can expand to several occurrences in one day;
        // they all resolve to the same series master and count as one match.
        matches.dedup_by(|a, b| a.target_id() == b.target_id());

        match matches.len() {
            0 => Err(ApiError::not_found("event", title)),
            1 => Ok(matches.remove(0)),
            count => Err(ApiError::ambiguous("event", title, count)),
        }
    }

    pub async fn get_event(&self, user_id: &str, event_id: &str) -> Result<EventRecord, ApiError> {
        let value = self
            .graph
            .get(&urls::calendar_event(user_id, event_id))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_subject(
        &self,
        user_id: &str,
        event_id: &str,
        subject: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(
                &urls::calendar_event(user_id, event_id),
                &json!({ "subject": subject }),
            )
            .await
    }

    pub async fn update_body(
        &self,
        user_id: &str,
        event_id: &str,
        content: &str,
        content_type: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(
                &urls::calendar_event(user_id, event_id),
                &json!({ "body": { "contentType": content_type, "content": content } }),
            )
            .await
    }

    pub async fn update_times(
        &self,
        user_id: &str,
        event_id: &str,
        times: &DateTimePatch,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(times)?;
        self.graph
            .patch(&urls::calendar_event(user_id, event_id), &body)
            .await
    }

    pub async fn update_location(
        &self,
        user_id: &str,
        event_id: &str,
        location: &str,
    ) -> Result<(), ApiError> {
        self.graph
            .patch(
                &urls::calendar_event(user_id, event_id),
                &json!({ "location": { "displayName": location } }),
            )
            .await
    }

    /// Replace the full attendee list.
    pub async fn update_attendees(
        &self,
        user_id: &str,
        event_id: &str,
        attendees: &[Attendee],
    ) -> Result<(), ApiError> {
        let body = json!({ "attendees": serde_json::to_value(attendees)? });
        self.graph
            .patch(&urls::calendar_event(user_id, event_id), &body)
            .await
    }

    pub async fn delete_event(&self, user_id: &str, event_id: &str) -> Result<(), ApiError> {
        self.graph
            .delete(&urls::calendar_event(user_id, event_id))
            .await
    }
}
