use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

// Formats carrying an explicit UTC offset, as printed by the digdag CLI
const OFFSET_FORMATS: [&str; 4] =
    ["%Y-%m-%d %H:%M:%S %:z", "%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%z"];

// Formats without an offset are taken as UTC
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp in any of the textual forms the digdag CLI emits
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00+09:00`), space separated date-times
/// with an offset (`2024-03-01 09:30:00 +09:00`, `... +0900`), a trailing
/// `UTC` or `Z` zone name, offset-less date-times and bare dates. Offset-less
/// values are interpreted as UTC and bare dates as midnight UTC.
///
/// Returns `None` when no format matches.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = value.strip_suffix("UTC").or_else(|| value.strip_suffix('Z')).unwrap_or(value).trim_end();
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Serde deserializer for timestamp strings using [`parse_timestamp`]
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).ok_or_else(|| Error::custom(format!("invalid timestamp: {:?}", value)))
}
