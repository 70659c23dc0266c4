//! Show API response DTOs.
//!
//! These types map directly to the elements of the arrays the show API
//! returns. They use `Option` liberally because the API sends `null` or
//! omits fields for entries that are not fully scheduled yet.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Top-level key of the roster response.
pub const RIDER_DATA_KEY: &str = "riderData";

/// Top-level key of the class list response.
pub const CLASS_DATA_KEY: &str = "classData";

/// Top-level key of the per-rider schedule response.
pub const RIDER_PAGE_DATA_KEY: &str = "riderPageData";

/// A rider registered for the show.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterEntry {
    #[serde(rename = "riderID")]
    pub rider_id: i64,

    /// Display name, usually wrapped in an HTML link (`<a ...>Jane Doe</a>`).
    #[serde(rename = "riderName")]
    pub rider_name: String,
}

/// A class (competition) of the show.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassRecord {
    /// Class number. The API sends it as either a number or a string; it is
    /// kept as text because ride entries reference classes by the number
    /// extracted from an HTML fragment.
    #[serde(rename = "classID", deserialize_with = "string_or_number")]
    pub class_id: String,

    #[serde(rename = "className", default)]
    pub class_name: Option<String>,

    /// Remaining fields, passed through unused.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One ride of a rider, as listed on the rider's page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleEntry {
    /// HTML fragment containing the class number (`<a ...>412</a>`).
    pub class_text: Option<String>,

    /// Test name within the class, e.g. "Preliminary Test 1".
    pub test: Option<String>,

    pub ring: Option<String>,

    /// Day of the ride, e.g. "2025-06-13T00:00:00".
    pub day: Option<String>,

    /// Ride time, e.g. "2025-06-13T08:42:00".
    pub ride_time: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_entry_from_api_json() {
        let json = r##"{"riderID": 42, "riderName": "<a href=\"#\">Jane Doe</a>", "horses": 2}"##;
        let entry: RosterEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.rider_id, 42);
        assert_eq!(entry.rider_name, "<a href=\"#\">Jane Doe</a>");
    }

    #[test]
    fn class_id_accepts_number_or_string() {
        let numeric: ClassRecord =
            serde_json::from_str(r#"{"classID": 412, "className": "Training Level"}"#).unwrap();
        let text: ClassRecord =
            serde_json::from_str(r#"{"classID": "412", "className": "Training Level"}"#).unwrap();

        assert_eq!(numeric.class_id, "412");
        assert_eq!(text.class_id, "412");
    }

    #[test]
    fn class_record_keeps_unknown_fields() {
        let record: ClassRecord =
            serde_json::from_str(r#"{"classID": 7, "className": null, "judge": "M. Tremblay"}"#)
                .unwrap();

        assert_eq!(record.class_name, None);
        assert_eq!(
            record.extra.get("judge"),
            Some(&serde_json::Value::String("M. Tremblay".into()))
        );
    }

    #[test]
    fn class_id_rejects_other_types() {
        let result: Result<ClassRecord, _> = serde_json::from_str(r#"{"classID": [1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn schedule_entry_tolerates_missing_fields() {
        let json = r#"{"classText": "<a>12</a>", "ring": "Ring 1", "rideTime": "2025-06-13T08:42:00"}"#;
        let entry: RawScheduleEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.class_text.as_deref(), Some("<a>12</a>"));
        assert_eq!(entry.test, None);
        assert_eq!(entry.day, None);
        assert_eq!(entry.ride_time.as_deref(), Some("2025-06-13T08:42:00"));
    }
}
