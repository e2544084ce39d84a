//! Lenient decoding of points in time stored inside blobs.
//!
//! # Responsibility
//! - Accept every timestamp shape found in stored task lists: epoch
//!   milliseconds (integer or float), RFC 3339 strings such as
//!   `2025-06-15T10:00:00.000Z`, and date-only `YYYY-MM-DD` strings.
//!
//! # Invariants
//! - Decoded values are Unix epoch milliseconds in UTC.
//! - Date-only strings resolve to UTC midnight.
//! - Encoding is untouched: stores always write epoch milliseconds.

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTime {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl WireTime {
    /// `Ok(None)` for a blank string.
    fn into_epoch_ms(self) -> Result<Option<i64>, String> {
        match self {
            Self::Millis(value) => Ok(Some(value)),
            Self::FractionalMillis(value) if value.is_finite() => Ok(Some(value.round() as i64)),
            Self::FractionalMillis(value) => Err(format!("non-finite timestamp `{value}`")),
            Self::Text(text) => parse_text(text.trim()),
        }
    }
}

fn parse_text(text: &str) -> Result<Option<i64>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(value) = text.parse::<i64>() {
        return Ok(Some(value));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(parsed.timestamp_millis()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Some(midnight.and_utc().timestamp_millis()))
        .ok_or_else(|| format!("unrecognized timestamp `{text}`"))
}

/// `deserialize_with` helper for required timestamps.
pub(crate) fn epoch_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    WireTime::deserialize(deserializer)?
        .into_epoch_ms()
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("timestamp must not be blank"))
}

/// `deserialize_with` helper for optional timestamps; `null` and blank
/// strings decode as `None`.
pub(crate) fn optional_epoch_ms<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WireTime>::deserialize(deserializer)? {
        Some(raw) => raw.into_epoch_ms().map_err(de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{epoch_ms, optional_epoch_ms};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Stamped {
        #[serde(deserialize_with = "epoch_ms")]
        at: i64,
        #[serde(default, deserialize_with = "optional_epoch_ms")]
        due: Option<i64>,
    }

    fn decode(raw: &str) -> Result<Stamped, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[test]
    fn accepts_numbers_and_iso_strings() {
        let numeric = decode(r#"{"at":1750000000000,"due":1750000000000.4}"#).unwrap();
        assert_eq!(numeric.at, 1_750_000_000_000);
        assert_eq!(numeric.due, Some(1_750_000_000_000));

        let iso = decode(r#"{"at":"2025-06-15T10:00:00.000Z","due":"2025-06-15T12:00:00+02:00"}"#)
            .unwrap();
        assert_eq!(iso.at, 1_749_981_600_000);
        assert_eq!(iso.due, Some(1_749_981_600_000));
    }

    #[test]
    fn date_only_string_is_utc_midnight() {
        let parsed = decode(r#"{"at":"2025-06-15"}"#).unwrap();
        assert_eq!(parsed.at, 1_749_945_600_000);
        assert_eq!(parsed.due, None);
    }

    #[test]
    fn blank_and_null_optional_dates_are_absent() {
        assert_eq!(decode(r#"{"at":0,"due":null}"#).unwrap().due, None);
        assert_eq!(decode(r#"{"at":0,"due":"  "}"#).unwrap().due, None);
    }

    #[test]
    fn rejects_garbage_and_blank_required_time() {
        assert!(decode(r#"{"at":"next tuesday"}"#).is_err());
        assert!(decode(r#"{"at":""}"#).is_err());
        assert!(decode(r#"{"at":true}"#).is_err());
    }
}
