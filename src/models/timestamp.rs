//! Timestamp wire format
//!
//! The backend exchanges naive local date-times (`2024-05-01T09:30:00`,
//! sometimes with fractional seconds). Values carrying an explicit offset are
//! accepted too and converted to local time.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Format used when sending timestamps to the backend. Sub-second digits are
/// written only when present.
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Format of the editable form representation (`datetime-local` style)
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a timestamp as produced by the backend
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, INPUT_FORMAT))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

/// Current local time, the reference point for all "past/upcoming" checks
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(WIRE_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// Same format for optional fields (`created_at`)
pub mod optional {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_backend_formats() {
        assert_eq!(parse("2024-05-01T09:30:00"), Some(at(9, 30, 0)));
        assert_eq!(
            parse("2024-05-01T09:30:00.123456").map(|dt| dt.format(WIRE_FORMAT).to_string()),
            Some("2024-05-01T09:30:00.123456".to_string())
        );
        assert_eq!(parse("2024-05-01T09:30"), Some(at(9, 30, 0)));
        assert_eq!(parse("2024-05-01 09:30:15"), Some(at(9, 30, 15)));
    }

    #[test]
    fn test_serialize_keeps_fractional_seconds() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "crate::models::timestamp")]
            at: NaiveDateTime,
        }

        let whole = Wrapper { at: at(9, 30, 0) };
        assert_eq!(
            serde_json::to_string(&whole).unwrap(),
            r#"{"at":"2024-05-01T09:30:00"}"#
        );

        let precise = at(9, 30, 0) + chrono::Duration::nanoseconds(925_206_349);
        let json = serde_json::to_string(&Wrapper { at: precise }).unwrap();
        assert_eq!(json, r#"{"at":"2024-05-01T09:30:00.925206349"}"#);

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, precise);
    }

    #[test]
    fn test_parse_with_offset_converts_to_local() {
        let parsed = parse("2024-05-01T09:30:00Z").unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-05-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse("tomorrow"), None);
        assert_eq!(parse(""), None);
    }
}
