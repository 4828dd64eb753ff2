//! Timestamp encoding shared with the remote API.
//!
//! The API exchanges local wall-clock timestamps in ISO-8601 form without a zone designator and
//! with millisecond precision (`2024-06-11T09:00:00.000`). Parsing is lenient about the
//! fractional part so hand-written payloads with whole seconds are accepted too.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, MINUTE_FORMAT))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS[.fff]] ({err})"))
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Same encoding for optional fields; use with `#[serde(default, with = "wire::option")]`.
pub mod option {
    use super::{format_timestamp, parse_timestamp};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&format_timestamp(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<String>::deserialize(deserializer)?;
        opt.map(|value| parse_timestamp(&value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
