//! Event payload and record shapes mirroring the Graph event schema.

use serde::{Deserialize, Serialize};

use crate::graph::types::{DateTimeZone, ItemBody};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Attendee response status, only present when reading an event back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeStatus {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendeeStatus>,
}

impl Attendee {
    /// Graph attendee object for a bare email address; everyone we invite
    /// is a required attendee.
    pub fn required(address: impl Into<String>) -> Self {
        Self {
            email_address: EmailAddress {
                address: address.into(),
                name: None,
            },
            kind: "required".to_string(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: String,
}

/// One of the four supported Graph recurrence patterns. Only the fields the
/// pattern type needs are serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    #[serde(rename = "type")]
    pub kind: String,
    pub interval: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,
}

/// Bound of a recurrence series; this facade only issues end-date ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRange {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
}

impl RecurrenceRange {
    pub fn end_date(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            kind: "endDate".to_string(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recurrence {
    pub pattern: RecurrencePattern,
    pub range: RecurrenceRange,
}

/// Outbound event creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    pub start: DateTimeZone,
    pub end: DateTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// PATCH body for rescheduling an event.
#[derive(Debug, Clone, Serialize)]
pub struct DateTimePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTimeZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTimeZone>,
}

/// Event as the Graph API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub subject: Option<String>,
    pub start: Option<DateTimeZone>,
    pub end: Option<DateTimeZone>,
    pub body: Option<ItemBody>,
    pub location: Option<Location>,
    pub attendees: Option<Vec<Attendee>>,
    pub recurrence: Option<Recurrence>,
    /// Present on occurrences of a recurring series; mutations must target
    /// the series master, not the expanded occurrence.
    pub series_master_id: Option<String>,
    pub created_date_time: Option<String>,
}

impl EventRecord {
    /// The id to mutate: the series master for recurring occurrences,
    /// otherwise the event itself.
    pub fn target_id(&self) -> &str {
        self.series_master_id.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_attendees_in_graph_shape() {
        let json = serde_json::to_value(Attendee::required("a@x.com")).unwrap();
        assert_eq!(json["emailAddress"]["address"], "a@x.com");
        assert_eq!(json["type"], "required");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn it_serializes_recurrence_without_unused_fields() {
        let recurrence = Recurrence {
            pattern: RecurrencePattern {
                kind: "weekly".to_string(),
                interval: 2,
                days_of_week: Some(vec!["Monday".to_string(), "Friday".to_string()]),
                day_of_month: None,
                month: None,
            },
            range: RecurrenceRange::end_date("2025-07-01", "2025-12-31"),
        };
        let json = serde_json::to_value(&recurrence).unwrap();
        assert_eq!(json["pattern"]["type"], "weekly");
        assert_eq!(json["pattern"]["daysOfWeek"][1], "Friday");
        assert!(json["pattern"].get("dayOfMonth").is_none());
        assert_eq!(json["range"]["type"], "endDate");
    }

    #[test]
    fn it_targets_the_series_master_for_occurrences() {
        let record: EventRecord = serde_json::from_value(serde_json::json!({
            "id": "occurrence-1",
            "subject": "Standup",
            "seriesMasterId": "master-1"
        }))
        .unwrap();
        assert_eq!(record.target_id(), "master-1");
    }
}
