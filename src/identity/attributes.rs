use serde_json::{Map, Value};
use thiserror::Error;

pub const FROM_KEY: &str = "from";

/// Why a message attribute payload could not be read
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributesError {
    #[error("attributes are not valid JSON: {0}")]
    Syntax(String),

    #[error("attributes are JSON but not an object (found {0})")]
    NotAnObject(&'static str),
}

/// Outcome of looking for a stored `from` label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FromAttribute {
    Present(String),
    Absent,
    Malformed(AttributesError),
}

impl FromAttribute {
    /// The stored label, treating a malformed payload the same as none
    pub fn label(&self) -> Option<&str> {
        match self {
            FromAttribute::Present(label) => Some(label),
            FromAttribute::Absent | FromAttribute::Malformed(_) => None,
        }
    }
}

/// Read attributes into a map. `Ok(None)` means there was nothing to read.
pub fn parse_attribute_map(raw: Option<&Value>) -> Result<Option<Map<String, Value>>, AttributesError> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => {
            serde_json::from_str::<Value>(text).map_err(|e| AttributesError::Syntax(e.to_string()))?
        }
        Some(other) => other.clone(),
    };

    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(AttributesError::NotAnObject(json_type_name(&other))),
    }
}

/// Extract the stored `from` label from a provider attribute payload
pub fn parse_attributes(raw: Option<&Value>) -> FromAttribute {
    match parse_attribute_map(raw) {
        Ok(Some(map)) => match map.get(FROM_KEY).and_then(Value::as_str) {
            Some(label) if !label.is_empty() => FromAttribute::Present(label.to_string()),
            _ => FromAttribute::Absent,
        },
        Ok(None) => FromAttribute::Absent,
        Err(e) => FromAttribute::Malformed(e),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
