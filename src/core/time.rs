//! Date and time parsing shared by the event and to-do managers.
//!
//! Timezones are never interpreted here. Graph expects a naive local
//! timestamp plus an IANA zone name, so dates and times stay naive and the
//! zone string is passed through to the API verbatim.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ApiError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"];
const TIME_FORMATS: [&str; 3] = ["%H:%M", "%H:%M:%S", "%I:%M %p"];

/// Parse a client-supplied date. Accepts `YYYY-MM-DD` plus the two US-style
/// formats the original clients were already sending.
pub fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ApiError::Validation(format!("date format not supported: {value}")))
}

/// Parse a client-supplied wall-clock time (`HH:MM`, with seconds or a
/// 12-hour `AM`/`PM` suffix tolerated).
pub fn parse_time(value: &str) -> Result<NaiveTime, ApiError> {
    let value = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ApiError::Validation(format!("time format not supported: {value}")))
}

/// Combine a date and time string into the `YYYY-MM-DDTHH:MM:SS` shape the
/// Graph dateTimeTimeZone object carries.
pub fn combine(date: &str, time: &str) -> Result<String, ApiError> {
    let combined = combine_naive(date, time)?;
    Ok(combined.format("%Y-%m-%dT%H:%M:%S").to_string())
}

pub fn combine_naive(date: &str, time: &str) -> Result<NaiveDateTime, ApiError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time))
}

/// The `[00:00, 24:00)` window of a single day, as a pair of naive
/// timestamps for a calendarView query.
pub fn day_window(date: NaiveDate) -> Result<(String, String), ApiError> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| ApiError::Validation(format!("date out of range: {date}")))?;
    Ok((
        date.format("%Y-%m-%dT00:00:00").to_string(),
        next.format("%Y-%m-%dT00:00:00").to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_supported_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        assert_eq!(parse_date("2025-07-02").unwrap(), expected);
        assert_eq!(parse_date("07/02/2025").unwrap(), expected);
        assert_eq!(parse_date("07-02-2025").unwrap(), expected);
    }

    #[test]
    fn it_rejects_unknown_date_formats() {
        assert!(parse_date("July 2nd").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn it_parses_supported_time_formats() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_time("14:30").unwrap(), expected);
        assert_eq!(parse_time("14:30:00").unwrap(), expected);
        assert_eq!(parse_time("02:30 PM").unwrap(), expected);
    }

    #[test]
    fn it_combines_date_and_time() {
        assert_eq!(
            combine("2025-07-02", "09:15").unwrap(),
            "2025-07-02T09:15:00"
        );
    }

    #[test]
    fn it_builds_a_half_open_day_window() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let (start, end) = day_window(date).unwrap();
        assert_eq!(start, "2025-12-31T00:00:00");
        assert_eq!(end, "2026-01-01T00:00:00");
    }
}
