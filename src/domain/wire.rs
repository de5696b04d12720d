//! Serde adapters for the loosely typed values the backend emits.
//!
//! Dates may arrive as plain `YYYY-MM-DD` or as full timestamps, counts may
//! arrive as JSON strings, and empty values may be `null` or `""`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format used when sending dates to the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parses a timestamp from RFC 3339, SQL-style or bare-date representations.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn blank_to_none(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `Option<NaiveDate>` that tolerates timestamps, `null` and `""`.
pub mod optional_date {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match blank_to_none(Option::<String>::deserialize(deserializer)?) {
            None => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {raw}"))),
        }
    }
}

/// `Option<NaiveDateTime>` that tolerates several timestamp layouts.
pub mod optional_timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match blank_to_none(Option::<String>::deserialize(deserializer)?) {
            None => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

/// Optional free text where `""` is the same as absent.
pub mod optional_text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(blank_to_none(Option::<String>::deserialize(deserializer)?))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Float(f64),
    Text(String),
}

/// Reads an aggregate count from a number, numeric string or `null`.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCount>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawCount::Int(value)) => Ok(value),
        Some(RawCount::Float(value)) if value >= 0.0 => Ok(value as u64),
        Some(RawCount::Float(value)) => Err(D::Error::custom(format!("negative count: {value}"))),
        Some(RawCount::Text(text)) if text.trim().is_empty() => Ok(0),
        Some(RawCount::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid count: {text}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(parse_date("2024-06-01"), expected);
        assert_eq!(parse_date("2024-06-01T00:00:00.000Z"), expected);
        assert_eq!(parse_date("06/01/2024"), None);
    }

    #[test]
    fn parse_timestamp_accepts_sql_layout() {
        let ts = parse_timestamp("2024-06-02 10:30:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2024-06-02 10:30");
        let ts = parse_timestamp("2024-06-02T10:30:00.123Z").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "10:30:00");
    }
}
