//! Tolerant decoding helpers for backend payloads.
//!
//! The backend serializes decimals as strings in some endpoints, timestamps
//! with or without an offset, and occasionally nests JSON documents inside
//! string fields. Everything here decodes to `None`/`Absent` instead of
//! failing the surrounding record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::AiPattern;

/// A field that may arrive as a JSON object, as a string containing JSON, or
/// as null.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedJson<T> {
    Present(T),
    Absent,
    Malformed(String),
}

impl<T> Default for EmbeddedJson<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> EmbeddedJson<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl<T: DeserializeOwned> EmbeddedJson<T> {
    pub fn from_value(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::Absent,
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed == "null" {
                    return Self::Absent;
                }
                match serde_json::from_str::<T>(trimmed) {
                    Ok(value) => Self::Present(value),
                    Err(err) => Self::Malformed(err.to_string()),
                }
            }
            other => match serde_json::from_value::<T>(other.clone()) {
                Ok(value) => Self::Present(value),
                Err(err) => Self::Malformed(err.to_string()),
            },
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for EmbeddedJson<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
        Ok(Self::from_value(&raw))
    }
}

impl<T: Serialize> Serialize for EmbeddedJson<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

pub fn parse_f64(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

pub fn parse_i64(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_f64))
}

pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_i64))
}

pub fn lenient_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.unwrap_or(0.0))
}

pub fn lenient_i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_i64(deserializer)?.unwrap_or(0))
}

pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => parse_datetime(&text),
        _ => None,
    })
}

pub fn lenient_pattern<'de, D>(deserializer: D) -> Result<Option<AiPattern>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => AiPattern::parse(&text),
        _ => None,
    })
}

/// Lists sometimes arrive as null, as a single string, or as a
/// newline/comma separated string.
pub fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                Value::Object(map) => map
                    .get("description")
                    .or_else(|| map.get("name"))
                    .or_else(|| map.get("title"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                other => Some(other.to_string()),
            })
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::String(text)) => text
            .split(['\n', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
