//! Per-field error messages, shared by local validation and backend 400s

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Message used by the backend and by local validation for empty fields
pub const REQUIRED: &str = "This field is required.";

/// A map from field name to messages.
///
/// Backend error maps are kept exactly as received, so a value is usually a
/// list of strings but may be a bare string or a nested object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Map<String, Value>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let entry = self
            .0
            .entry(field.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        match entry {
            Value::Array(messages) => messages.push(Value::String(message.into())),
            other => {
                let previous = other.take();
                *other = Value::Array(vec![previous, Value::String(message.into())]);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for a field, flattened to strings
    pub fn messages(&self, field: &str) -> Vec<String> {
        self.0.get(field).map(flatten).unwrap_or_default()
    }

    /// Iterate fields with their flattened messages
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), flatten(v)))
    }

    /// The map as received
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::BookshelfError::Validation(self))
        }
    }
}

impl From<Map<String, Value>> for FieldErrors {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}
