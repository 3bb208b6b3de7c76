use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a log record. The backend sends a numeric id, older
/// clients stored string ids, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogId {
    Number(i64),
    Text(String),
}

impl Default for LogId {
    fn default() -> Self {
        LogId::Text(String::new())
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogId::Number(n) => write!(f, "{n}"),
            LogId::Text(s) => f.write_str(s),
        }
    }
}

/// One audit-log record exactly as returned by the backend.
///
/// Field names on the wire are the backend's. Fields this type does not
/// model are kept in `extra` so a JSON export reproduces the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogRecord {
    #[serde(default)]
    pub id: LogId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(rename = "usuario", default, deserialize_with = "text_field")]
    pub user: String,

    #[serde(rename = "rol", default, deserialize_with = "text_field")]
    pub role: String,

    #[serde(rename = "accion", default, deserialize_with = "text_field")]
    pub action: String,

    #[serde(rename = "entidad", default, deserialize_with = "text_field")]
    pub entity: String,

    #[serde(rename = "entidadId", default, deserialize_with = "text_field")]
    pub entity_id: String,

    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "detalles", default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(rename = "ipAddress", default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(rename = "userAgent", default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawLogRecord {
    /// The record's timestamp, if present and in a recognized shape.
    pub fn occurred_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    /// The detail payload as a JSON value.
    ///
    /// The backend stores details as text, so a string holding a JSON
    /// object or array is decoded. Any other string is returned as-is.
    pub fn detail_value(&self) -> Option<Value> {
        match self.details.as_ref()? {
            Value::Null => None,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(v @ (Value::Object(_) | Value::Array(_))) => Some(v),
                    _ => Some(Value::String(s.clone())),
                }
            }
            other => Some(other.clone()),
        }
    }

    /// Free-text description: the top-level field first, then the one
    /// nested in the detail payload.
    pub fn description_text(&self) -> Option<String> {
        if let Some(d) = self.description.as_deref().map(str::trim)
            && !d.is_empty()
        {
            return Some(d.to_string());
        }
        self.detail_value()
            .as_ref()
            .and_then(|v| v.get("descripcion"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Parse a backend timestamp.
///
/// Accepts `LocalDateTime` output (`2024-01-15T10:30:00`, optional
/// fractional seconds), RFC 3339 with an offset (kept as its wall-clock
/// value), and `2024-01-15 10:30:00`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").ok()
}

/// Deserialize a text column that may arrive as null, a number, or a
/// nested user object.
fn text_field<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => ["username", "nombre", "id"]
            .iter()
            .find_map(|k| map.get(*k))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default(),
        Value::Array(_) => String::new(),
    })
}
