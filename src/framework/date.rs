//! # Wire Timestamps
//!
//! The remote API speaks a single timestamp format, `yyyy-MM-dd'T'HH:mm:ssZ`
//! with a four-digit numeric offset (`2024-01-02T03:04:05+0000`). Properties keep
//! that text; conversion happens only at the accessor boundary.
//!
//! Parsing is strict: the text must have exactly that shape and every field must
//! be in range. `2024-02-30T00:00:00+0000` is rejected rather than rolled over
//! to March 1st.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt::Display;

/// `chrono` rendition of the wire pattern.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

// `yyyy-MM-ddTHH:mm:ss` + `+HHMM`
const WIRE_LEN: usize = 24;

/// Parses a wire timestamp, returning `None` for anything that is not one.
pub fn parse_wire(text: &str) -> Option<DateTime<FixedOffset>> {
    if !has_wire_shape(text.as_bytes()) {
        return None;
    }
    DateTime::parse_from_str(text, WIRE_FORMAT).ok()
}

// chrono accepts one-digit fields and `+HH:MM`; pin every byte first.
fn has_wire_shape(bytes: &[u8]) -> bool {
    bytes.len() == WIRE_LEN
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 => b == b'+' || b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Formats a timestamp in its own offset. Sub-second precision is dropped.
pub fn format_wire<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.format(WIRE_FORMAT).to_string()
}

/// Serde adapter for `Option<DateTime<FixedOffset>>` record fields.
///
/// Serializes to wire text; a malformed value deserializes to `None`, matching
/// [`PropertyBag::get_date`](crate::framework::PropertyBag::get_date).
pub mod option_wire {
    use super::{format_wire, parse_wire};
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&format_wire(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(text.as_ref().and_then(|v| v.as_str()).and_then(parse_wire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    #[test]
    fn test_parse_utc() {
        let parsed = parse_wire("2024-01-02T03:04:05+0000").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_keeps_offset() {
        let parsed = parse_wire("2024-06-30T23:59:59-0530").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));
        assert_eq!(parsed.with_timezone(&Utc).hour(), 5);
    }

    #[test]
    fn test_strict_rejects_out_of_range_fields() {
        assert_eq!(parse_wire("2024-02-30T00:00:00+0000"), None);
        assert_eq!(parse_wire("2023-02-29T00:00:00+0000"), None);
        assert_eq!(parse_wire("2024-13-01T00:00:00+0000"), None);
        assert_eq!(parse_wire("2024-01-01T24:00:00+0000"), None);
        assert_eq!(parse_wire("2024-01-01T00:60:00+0000"), None);
    }

    #[test]
    fn test_strict_rejects_other_shapes() {
        assert_eq!(parse_wire("2024-01-02T03:04:05Z"), None);
        assert_eq!(parse_wire("2024-01-02T03:04:05+00:00"), None);
        assert_eq!(parse_wire("2024-01-02 03:04:05+0000"), None);
        assert_eq!(parse_wire("2024-01-02T03:04:05+0000 "), None);
        assert_eq!(parse_wire("2024-01-02"), None);
        assert_eq!(parse_wire("2024-1-02T03:04:05+00:00"), None);
        assert_eq!(parse_wire("2024-01-2T03:04:05+00:00"), None);
        assert_eq!(parse_wire("2024-01-02T3:04:05+00:00"), None);
        assert_eq!(parse_wire("2024-01-02T03:04:05+0a00"), None);
        assert_eq!(parse_wire(""), None);
    }

    #[test]
    fn test_leap_day_accepted() {
        assert!(parse_wire("2024-02-29T12:00:00+0100").is_some());
    }

    #[test]
    fn test_format_round_trip_at_second_precision() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let when = offset
            .with_ymd_and_hms(2025, 11, 3, 8, 15, 30)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        let text = format_wire(&when);
        assert_eq!(text, "2025-11-03T08:15:30+0200");
        assert_eq!(parse_wire(&text).unwrap(), when.with_nanosecond(0).unwrap());
    }
}
