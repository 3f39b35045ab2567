//! Wire shapes shared across Graph resources.

use serde::{Deserialize, Serialize};

/// Collection responses come back as `{"value": [...]}`.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// Graph `dateTimeTimeZone`: a naive ISO-8601 timestamp plus an IANA
/// timezone name, never a UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

impl DateTimeZone {
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.into(),
        }
    }
}

/// Graph `itemBody`, used for both event descriptions and task notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: String,
    pub content: String,
}

impl ItemBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content_type: "Text".to_string(),
            content: content.into(),
        }
    }

    pub fn new(content_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_a_collection_page() {
        let page: Page<String> = serde_json::from_str(r#"{"value": ["a", "b"]}"#).unwrap();
        assert_eq!(page.value, vec!["a", "b"]);
    }

    #[test]
    fn it_defaults_a_missing_value_array_to_empty() {
        let page: Page<String> = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_empty());
    }

    #[test]
    fn it_serializes_datetimes_in_graph_shape() {
        let dt = DateTimeZone::new("2025-07-02T09:00:00", "Asia/Karachi");
        let json = serde_json::to_value(&dt).unwrap();
        assert_eq!(json["dateTime"], "2025-07-02T09:00:00");
        assert_eq!(json["timeZone"], "Asia/Karachi");
    }
}
