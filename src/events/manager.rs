//! Business rules for calendar events: request validation, field
//! transformation, and delegation to the repository.
//!
//! Every method validates fully before touching the network, so a rejected
//! request never has partial side effects upstream.

use std::sync::Arc;

use super::repository::EventsRepository;
use super::types::{
    Attendee, DateTimePatch, EventPayload, EventRecord, Location, Recurrence, RecurrencePattern,
    RecurrenceRange,
};
use crate::core::time::{combine_naive, parse_date};
use crate::core::validate;
use crate::error::ApiError;
use crate::graph::types::{DateTimeZone, ItemBody};
use crate::graph::{GraphClient, UserRepository};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const GRAPH_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";

/// Fields shared by every event-creation request. The per-kind parameters
/// (date, recurrence bounds) arrive as separate arguments.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub user_email: String,
    pub subject: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub timezone: String,
    pub start_time: String,
    pub end_time: String,
}

pub struct EventsManager {
    users: UserRepository,
    repo: EventsRepository,
}

impl EventsManager {
    pub fn new(graph: Arc<GraphClient>) -> Self {
        Self {
            users: UserRepository::new(graph.clone()),
            repo: EventsRepository::new(graph),
        }
    }

    pub async fn create_one_time_event(
        &self,
        event: &NewEvent,
        date: &str,
    ) -> Result<EventRecord, ApiError> {
        self.create(event, date, None).await
    }

    /// Create from a caller-supplied recurrence object (the generic path).
    pub async fn create_recurring_event(
        &self,
        event: &NewEvent,
        start_date: &str,
        recurrence: Recurrence,
    ) -> Result<EventRecord, ApiError> {
        validate_recurrence(&recurrence)?;
        self.create(event, start_date, Some(recurrence)).await
    }

    pub async fn create_daily_recurring_event(
        &self,
        event: &NewEvent,
        start_date: &str,
        end_date: &str,
        interval: i32,
    ) -> Result<EventRecord, ApiError> {
        let recurrence = build_recurrence(RecurrenceParams {
            kind: "daily",
            start_date,
            end_date,
            interval,
            days_of_week: None,
            day_of_month: None,
            month: None,
        })?;
        self.create(event, start_date, Some(recurrence)).await
    }

    pub async fn create_weekly_recurring_event(
        &self,
        event: &NewEvent,
        start_date: &str,
        end_date: &str,
        interval: i32,
        days_of_week: &[String],
    ) -> Result<EventRecord, ApiError> {
        let recurrence = build_recurrence(RecurrenceParams {
            kind: "weekly",
            start_date,
            end_date,
            interval,
            days_of_week: Some(days_of_week),
            day_of_month: None,
            month: None,
        })?;
        self.create(event, start_date, Some(recurrence)).await
    }

    pub async fn create_monthly_recurring_event(
        &self,
        event: &NewEvent,
        start_date: &str,
        end_date: &str,
        interval: i32,
        day_of_month: i32,
    ) -> Result<EventRecord, ApiError> {
        let recurrence = build_recurrence(RecurrenceParams {
            kind: "absoluteMonthly",
            start_date,
            end_date,
            interval,
            days_of_week: None,
            day_of_month: Some(day_of_month),
            month: None,
        })?;
        self.create(event, start_date, Some(recurrence)).await
    }

    pub async fn create_yearly_recurring_event(
        &self,
        event: &NewEvent,
        start_date: &str,
        end_date: &str,
        interval: i32,
        day_of_month: i32,
        month: i32,
    ) -> Result<EventRecord, ApiError> {
        let recurrence = build_recurrence(RecurrenceParams {
            kind: "absoluteYearly",
            start_date,
            end_date,
            interval,
            days_of_week: None,
            day_of_month: Some(day_of_month),
            month: Some(month),
        })?;
        self.create(event, start_date, Some(recurrence)).await
    }

    pub async fn get_events_by_date(
        &self,
        user_email: &str,
        date: &str,
        timezone: &str,
    ) -> Result<Vec<EventRecord>, ApiError> {
        let date = parse_date(date)?;
        let user_id = self.users.resolve_user_id(user_email).await?;
        self.repo.events_on_date(&user_id, date, timezone).await
    }

    pub async fn edit_event_subject(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        new_subject: &str,
    ) -> Result<(), ApiError> {
        let new_subject = validate::non_empty(new_subject, "subject")?;
        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        self.repo
            .update_subject(&user_id, event.target_id(), &new_subject)
            .await
    }

    pub async fn edit_event_description(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        description: &str,
        content_type: Option<&str>,
    ) -> Result<(), ApiError> {
        let content_type = validate_content_type(content_type.unwrap_or("Text"))?;
        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        self.repo
            .update_body(&user_id, event.target_id(), description, &content_type)
            .await
    }

    /// Reschedule an event. Times are required; dates default to the
    /// lookup date so a pure time change is the common case.
    #[allow(clippy::too_many_arguments)]
    pub async fn edit_event_datetime(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        new_start_date: Option<&str>,
        new_end_date: Option<&str>,
        new_start_time: &str,
        new_end_time: &str,
    ) -> Result<(), ApiError> {
        let start_date = new_start_date.unwrap_or(date);
        let end_date = new_end_date.unwrap_or(start_date);
        let start = combine_naive(start_date, new_start_time)?;
        let end = combine_naive(end_date, new_end_time)?;
        if end <= start {
            return Err(ApiError::InvalidTimeRange(format!(
                "end {end} must be after start {start}"
            )));
        }

        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        let patch = DateTimePatch {
            start: Some(DateTimeZone::new(
                start.format(GRAPH_DATETIME).to_string(),
                timezone,
            )),
            end: Some(DateTimeZone::new(
                end.format(GRAPH_DATETIME).to_string(),
                timezone,
            )),
        };
        self.repo
            .update_times(&user_id, event.target_id(), &patch)
            .await
    }

    pub async fn edit_event_location(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        location: &str,
    ) -> Result<(), ApiError> {
        let location = validate::non_empty(location, "location")?;
        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        self.repo
            .update_location(&user_id, event.target_id(), &location)
            .await
    }

    /// Union new attendee emails into the existing list. Read-modify-write:
    /// not atomic against a concurrent change on the Graph side.
    pub async fn add_attendees(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        attendees: &[String],
    ) -> Result<(), ApiError> {
        if attendees.is_empty() {
            return Err(ApiError::Validation("attendees cannot be empty".into()));
        }
        let new_attendees = map_attendees(attendees)?;

        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        let current = self.repo.get_event(&user_id, event.target_id()).await?;

        let mut merged = current.attendees.unwrap_or_default();
        for attendee in new_attendees {
            let already_invited = merged.iter().any(|existing| {
                existing
                    .email_address
                    .address
                    .eq_ignore_ascii_case(&attendee.email_address.address)
            });
            if !already_invited {
                merged.push(attendee);
            }
        }

        self.repo
            .update_attendees(&user_id, event.target_id(), &merged)
            .await
    }

    /// Replace the full attendee list. An empty list clears all attendees.
    pub async fn modify_attendees(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
        attendees: &[String],
    ) -> Result<(), ApiError> {
        let attendees = map_attendees(attendees)?;
        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        self.repo
            .update_attendees(&user_id, event.target_id(), &attendees)
            .await
    }

    pub async fn delete_event(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
    ) -> Result<(), ApiError> {
        let (user_id, event) = self.locate(user_email, title, date, timezone).await?;
        tracing::debug!(event_id = event.target_id(), "deleting calendar event");
        self.repo.delete_event(&user_id, event.target_id()).await
    }

    /// Shared creation path for one-time and recurring events.
    async fn create(
        &self,
        event: &NewEvent,
        start_date: &str,
        recurrence: Option<Recurrence>,
    ) -> Result<EventRecord, ApiError> {
        let subject = validate::non_empty(&event.subject, "subject")?;
        let timezone = validate::non_empty(&event.timezone, "timezone")?;

        let start = combine_naive(start_date, &event.start_time)?;
        let end = combine_naive(start_date, &event.end_time)?;
        if end <= start {
            return Err(ApiError::InvalidTimeRange(format!(
                "end time {} must be after start time {}",
                event.end_time, event.start_time
            )));
        }

        let attendees = if event.attendees.is_empty() {
            None
        } else {
            Some(map_attendees(&event.attendees)?)
        };

        // One-time events default to plain text bodies, recurring ones to
        // HTML, matching what calling clients already expect.
        let default_content_type = if recurrence.is_some() { "HTML" } else { "Text" };
        let content_type =
            validate_content_type(event.content_type.as_deref().unwrap_or(default_content_type))?;
        let body = event
            .description
            .as_ref()
            .map(|description| ItemBody::new(&content_type, description));

        let payload = EventPayload {
            subject,
            body,
            start: DateTimeZone::new(start.format(GRAPH_DATETIME).to_string(), timezone.as_str()),
            end: DateTimeZone::new(end.format(GRAPH_DATETIME).to_string(), timezone.as_str()),
            location: event.location.as_ref().map(|name| Location {
                display_name: name.clone(),
            }),
            attendees,
            recurrence,
        };

        let user_id = self.users.resolve_user_id(&event.user_email).await?;
        tracing::debug!(user_id, subject = %payload.subject, "creating calendar event");
        self.repo.create_event(&user_id, &payload).await
    }

    /// Resolve the user, then the event by (title, date) within that user's
    /// calendar.
    async fn locate(
        &self,
        user_email: &str,
        title: &str,
        date: &str,
        timezone: &str,
    ) -> Result<(String, EventRecord), ApiError> {
        let title = validate::non_empty(title, "title")?;
        let date = parse_date(date)?;
        let user_id = self.users.resolve_user_id(user_email).await?;
        let event = self.repo.find_event(&user_id, &title, date, timezone).await?;
        Ok((user_id, event))
    }
}

/// Map bare email addresses to Graph attendee objects.
fn map_attendees(emails: &[String]) -> Result<Vec<Attendee>, ApiError> {
    emails
        .iter()
        .map(|address| {
            let address = validate::email(address, "attendee")?;
            Ok(Attendee::required(address))
        })
        .collect()
}

fn validate_content_type(value: &str) -> Result<String, ApiError> {
    match value {
        "Text" | "HTML" => Ok(value.to_string()),
        other => Err(ApiError::Validation(format!(
            "contentType must be 'Text' or 'HTML', got '{other}'"
        ))),
    }
}

struct RecurrenceParams<'a> {
    kind: &'static str,
    start_date: &'a str,
    end_date: &'a str,
    interval: i32,
    days_of_week: Option<&'a [String]>,
    day_of_month: Option<i32>,
    month: Option<i32>,
}

/// Build a validated pattern/range pair. The day-of-week list is preserved
/// verbatim, in the order supplied.
fn build_recurrence(params: RecurrenceParams<'_>) -> Result<Recurrence, ApiError> {
    let start_date = parse_date(params.start_date)?;
    let end_date = parse_date(params.end_date)?;

    let recurrence = Recurrence {
        pattern: RecurrencePattern {
            kind: params.kind.to_string(),
            interval: params.interval,
            days_of_week: params.days_of_week.map(<[String]>::to_vec),
            day_of_month: params.day_of_month,
            month: params.month,
        },
        range: RecurrenceRange::end_date(
            start_date.format("%Y-%m-%d").to_string(),
            end_date.format("%Y-%m-%d").to_string(),
        ),
    };
    validate_recurrence(&recurrence)?;
    Ok(recurrence)
}

/// Single enforcement point for recurrence rules, shared by the per-kind
/// builders and the generic recurrence path.
fn validate_recurrence(recurrence: &Recurrence) -> Result<(), ApiError> {
    let pattern = &recurrence.pattern;
    if pattern.interval < 1 {
        return Err(ApiError::InvalidRecurrence(format!(
            "interval must be at least 1, got {}",
            pattern.interval
        )));
    }

    match pattern.kind.as_str() {
        "daily" => {}
        "weekly" => {
            let days = pattern.days_of_week.as_deref().unwrap_or_default();
            if days.is_empty() {
                return Err(ApiError::InvalidRecurrence(
                    "weekly recurrence requires at least one day of week".into(),
                ));
            }
            for day in days {
                if !WEEKDAYS.iter().any(|name| name.eq_ignore_ascii_case(day)) {
                    return Err(ApiError::InvalidRecurrence(format!(
                        "unknown day of week: {day}"
                    )));
                }
            }
        }
        "absoluteMonthly" => {
            require_day_of_month(pattern.day_of_month)?;
        }
        "absoluteYearly" => {
            require_day_of_month(pattern.day_of_month)?;
            match pattern.month {
                Some(month) if (1..=12).contains(&month) => {}
                Some(month) => {
                    return Err(ApiError::InvalidRecurrence(format!(
                        "month must be between 1 and 12, got {month}"
                    )));
                }
                None => {
                    return Err(ApiError::InvalidRecurrence(
                        "yearly recurrence requires a month".into(),
                    ));
                }
            }
        }
        other => {
            return Err(ApiError::InvalidRecurrence(format!(
                "unsupported recurrence type: {other}"
            )));
        }
    }

    if recurrence.range.kind != "endDate" {
        return Err(ApiError::InvalidRecurrence(format!(
            "unsupported recurrence range type: {}",
            recurrence.range.kind
        )));
    }
    parse_date(&recurrence.range.start_date)?;
    parse_date(&recurrence.range.end_date)?;
    Ok(())
}

fn require_day_of_month(day: Option<i32>) -> Result<(), ApiError> {
    match day {
        Some(day) if (1..=31).contains(&day) => Ok(()),
        Some(day) => Err(ApiError::InvalidRecurrence(format!(
            "day of month must be between 1 and 31, got {day}"
        ))),
        None => Err(ApiError::InvalidRecurrence(
            "monthly recurrence requires a day of month".into(),
        )),
    }
}
