//! Lenient field casting for incoming documents
//!
//! Clients send form data in loosely typed JSON: numbers as strings, a single
//! platform instead of a list, dates without a time. These deserializers
//! cast such values to the schema type and reject anything that cannot be
//! cast. `null` and the empty string both mean "unset".

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\" (type string)", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
        other => other.to_string(),
    }
}

/// Optional string; numbers and booleans are stringified
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "Cast to string failed for value {}",
            describe(&other)
        ))),
    }
}

/// Optional finite number; numeric strings are parsed
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| {
            D::Error::custom(format!("Cast to Number failed for value {}", describe(&value)))
        })
}

/// Optional list of strings; a single string becomes a one-element list
pub fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(D::Error::custom(format!(
                "Cast to [string] failed for value {}",
                describe(&other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| Utc.from_utc_datetime(&dt))
        })
}

/// Optional date, serialized as an RFC 3339 timestamp with milliseconds
pub mod opt_date {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(value) => value,
        };

        let date = match &value {
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::String(s) => parse_date(s),
            // Epoch milliseconds
            Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        };

        date.map(Some).ok_or_else(|| {
            D::Error::custom(format!("Cast to Date failed for value {}", describe(&value)))
        })
    }
}
