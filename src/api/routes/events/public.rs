//! Public types for the events API

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::events::types::{EventRecord, Recurrence};

fn default_interval() -> i32 {
    1
}

/// Unified creation request. Which kind of event it describes is decided by
/// `kind()` from the fields that are present.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub user_email: String,
    pub subject: String,
    pub timezone: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub date: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default = "default_interval")]
    pub interval: i32,
    #[serde(rename = "daysOfWeek")]
    pub days_of_week: Option<Vec<String>>,
    #[serde(rename = "dayOfMonth")]
    pub day_of_month: Option<i32>,
    #[serde(rename = "monthOfYear")]
    pub month_of_year: Option<i32>,
    pub recurrence: Option<Recurrence>,
    pub description: Option<String>,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Debug)]
pub enum CreateEventKind {
    Recurring(Recurrence),
    Yearly {
        start_date: String,
        end_date: String,
        interval: i32,
        day_of_month: i32,
        month: i32,
    },
    Monthly {
        start_date: String,
        end_date: String,
        interval: i32,
        day_of_month: i32,
    },
    Weekly {
        start_date: String,
        end_date: String,
        interval: i32,
        days_of_week: Vec<String>,
    },
    Daily {
        start_date: String,
        end_date: String,
        interval: i32,
    },
    OneTime {
        date: String,
    },
}

impl CreateEventRequest {
    /// Classify the request by checking fields in a fixed order: a `date`
    /// without `recurrence` or `startDate` is one-time, then an explicit
    /// `recurrence` object, then `monthOfYear` (yearly), `dayOfMonth`
    /// (monthly), `daysOfWeek` (weekly), and finally a `startDate`/`endDate`
    /// pair (daily). Stray recurrence fields alongside a bare `date` do not
    /// change the outcome.
    pub fn kind(&self) -> Result<CreateEventKind, ApiError> {
        if let Some(date) = &self.date
            && self.recurrence.is_none()
            && self.start_date.is_none()
        {
            return Ok(CreateEventKind::OneTime { date: date.clone() });
        }
        if let Some(recurrence) = &self.recurrence {
            return Ok(CreateEventKind::Recurring(recurrence.clone()));
        }
        if let Some(month) = self.month_of_year {
            let day_of_month = self.day_of_month.ok_or_else(|| {
                ApiError::Validation("yearly events require dayOfMonth".into())
            })?;
            let (start_date, end_date) = self.date_range()?;
            return Ok(CreateEventKind::Yearly {
                start_date,
                end_date,
                interval: self.interval,
                day_of_month,
                month,
            });
        }
        if let Some(day_of_month) = self.day_of_month {
            let (start_date, end_date) = self.date_range()?;
            return Ok(CreateEventKind::Monthly {
                start_date,
                end_date,
                interval: self.interval,
                day_of_month,
            });
        }
        if let Some(days_of_week) = &self.days_of_week {
            let (start_date, end_date) = self.date_range()?;
            return Ok(CreateEventKind::Weekly {
                start_date,
                end_date,
                interval: self.interval,
                days_of_week: days_of_week.clone(),
            });
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let (start_date, end_date) = self.date_range()?;
            return Ok(CreateEventKind::Daily {
                start_date,
                end_date,
                interval: self.interval,
            });
        }
        Err(ApiError::Validation(
            "unable to determine event type; supply date, startDate/endDate, or recurrence fields"
                .into(),
        ))
    }

    fn date_range(&self) -> Result<(String, String), ApiError> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => Ok((start.clone(), end.clone())),
            _ => Err(ApiError::Validation(
                "recurring events require startDate and endDate".into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetEventsRequest {
    pub user_email: String,
    pub date: String,
    pub timezone: String,
}

#[derive(Debug, Deserialize)]
pub struct EditEventRequest {
    pub user_email: String,
    pub title: String,
    pub date: String,
    pub timezone: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "contentType")]
    pub content_type: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub attendees: Option<Vec<String>>,
    #[serde(rename = "attendeeAction")]
    pub attendee_action: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEventRequest {
    pub user_email: String,
    pub title: String,
    pub date: String,
    pub timezone: String,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventRecord>,
}
