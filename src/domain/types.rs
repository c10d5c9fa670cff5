use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for rooms and equipment records.
///
/// Records saved by earlier versions carry millisecond timestamps as numeric
/// ids; new records get a UUID. Both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Text(String),
}

impl RecordId {
    pub fn generate() -> Self {
        Self::Text(Uuid::new_v4().to_string())
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Coerce a raw form value into something the calculator can take:
/// NaN, infinities and negatives become 0.
pub fn sanitize_number(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Serde adapter for persisted numeric fields. Anything that is not a usable
/// number (null, text that does not parse, NaN, negatives) reads as 0.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(sanitize_number(raw))
}

/// [`lenient_number`] for whole counts; fractions round to the nearest unit.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    // float to int casts saturate
    Ok(lenient_number(deserializer)?.round() as u32)
}
