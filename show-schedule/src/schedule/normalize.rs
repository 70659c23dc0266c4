//! Text normalizers for raw show API values.
//!
//! Rider names and class numbers arrive wrapped in HTML fragments, and days
//! and ride times arrive as whatever date format the show office exported.
//! Everything here is a pure function; only date/time parsing can fail.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;

/// Shown in place of a day or time that could not be parsed.
pub const UNPARSED_PLACEHOLDER: &str = "??";

/// Ring whose official name is shortened on the printed schedule.
const COMBINED_RING: &str = "Combine Obstacle";
const COMBINED_RING_DISPLAY: &str = "Combiné";

/// Date-time layouts with a numeric offset that RFC 3339 rejects (`+0000`).
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Date-time layouts without an offset, read as local time.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as local midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Error returned when a day or ride time is not a recognisable date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised date/time: {input:?}")]
pub struct DateTimeError {
    pub input: String,
}

fn rider_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r">([^<]+)<").expect("rider name pattern is valid"))
}

fn class_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r">([0-9]+)<").expect("class number pattern is valid"))
}

fn first_capture<'a>(pattern: &Regex, raw: &'a str) -> &'a str {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(raw, |m| m.as_str())
}

/// Extract the text of an HTML-wrapped rider name.
///
/// ```
/// use show_schedule::schedule::extract_rider_name;
///
/// assert_eq!(extract_rider_name(r#"<a href="/r/1">Jane Doe</a>"#), "Jane Doe");
/// assert_eq!(extract_rider_name("Jane Doe"), "Jane Doe");
/// ```
pub fn extract_rider_name(raw: &str) -> &str {
    first_capture(rider_name_pattern(), raw)
}

/// Extract the class number from an HTML-wrapped class link.
///
/// Returns the input unchanged if it holds no `>digits<` run.
pub fn extract_class_number(raw: &str) -> &str {
    first_capture(class_number_pattern(), raw)
}

/// Shorten ring names that have a display alias.
pub fn normalize_ring_name(name: &str) -> &str {
    if name == COMBINED_RING {
        COMBINED_RING_DISPLAY
    } else {
        name
    }
}

/// Parse a date or date-time into local time.
///
/// Accepts RFC 3339 (converted to local time), ISO and US layouts without
/// an offset, bare dates (midnight) and ASP.NET `/Date(ms)/` values.
pub fn parse_local_date_time(input: &str) -> Result<NaiveDateTime, DateTimeError> {
    let s = input.trim();
    let err = || DateTimeError {
        input: input.to_string(),
    };

    if let Some(millis) = parse_epoch_millis(s) {
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .ok_or_else(err);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    if let Some(dt) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(err)
}

/// `/Date(1718236800000)/` or `/Date(1718236800000-0400)/`.
///
/// The millisecond count is UTC; a trailing offset is informational only.
fn parse_epoch_millis(s: &str) -> Option<i64> {
    let inner = s.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let digits_end = inner
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(inner.len(), |(i, _)| i);
    inner[..digits_end].parse().ok()
}

fn english_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekday name of a show day, in French for the show weekend.
///
/// Friday to Sunday are translated; the other days keep their English name
/// since shows only run on weekends.
pub fn french_day(day: &str) -> Result<&'static str, DateTimeError> {
    let weekday = parse_local_date_time(day)?.weekday();
    Ok(match weekday {
        Weekday::Fri => "Vendredi",
        Weekday::Sat => "Samedi",
        Weekday::Sun => "Dimanche",
        other => english_weekday(other),
    })
}

/// Local `HH:MM` (24-hour) of a ride time.
pub fn format_time(ride_time: &str) -> Result<String, DateTimeError> {
    Ok(parse_local_date_time(ride_time)?.format("%H:%M").to_string())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// `>X<` always yields X when X has no `<`
        #[test]
        fn bracketed_name_is_extracted(name in "[^<]{1,40}") {
            let raw = format!(">{name}<");
            prop_assert_eq!(extract_rider_name(&raw), name.as_str());
        }

        /// Strings without a `>` have nothing to extract
        #[test]
        fn unbracketed_name_is_unchanged(raw in "[^>]{0,40}") {
            prop_assert_eq!(extract_rider_name(&raw), raw.as_str());
        }

        /// Only the combined ring is renamed
        #[test]
        fn other_rings_are_unchanged(ring in "\\PC{0,30}") {
            prop_assume!(ring != "Combine Obstacle");
            prop_assert_eq!(normalize_ring_name(&ring), ring.as_str());
        }

        /// Every valid calendar date has a day name
        #[test]
        fn every_date_has_a_day(y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28) {
            let day = format!("{y:04}-{m:02}-{d:02}");
            prop_assert!(french_day(&day).is_ok());
        }

        /// Naive times round-trip through HH:MM
        #[test]
        fn naive_time_is_formatted(h in 0u32..24, min in 0u32..60) {
            let raw = format!("2025-06-13T{h:02}:{min:02}:00");
            prop_assert_eq!(format_time(&raw).unwrap(), format!("{h:02}:{min:02}"));
        }
    }
}
