use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::FunctionsError;

/// Result of the single outbound GET, as handed back by the host's HTTP
/// primitive.
///
/// `error` is the top-level error marker. `data` is passed to the encoder
/// untouched; its shape depends on the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    #[serde(
        default,
        deserialize_with = "error_marker",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Value,
}

impl HttpResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            error: None,
            status: Some(200),
            data,
        }
    }

    pub fn failed(error: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            error: Some(error.into()),
            status,
            data: Value::Null,
        }
    }

    /// Parse a response object produced by a host runtime, e.g.
    /// `{"error": true, "data": null}` or `{"data": {...}}`.
    pub fn from_json(json: &str) -> Result<Self, FunctionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Read a host error marker by truthiness: `null`, `false`, `0` and `""` mean
/// no error; any other value is kept as the error text.
fn error_marker<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let marker = Value::deserialize(deserializer)?;
    Ok(match marker {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    })
}
