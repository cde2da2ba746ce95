use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A record offered as a possible match.
///
/// The record itself is opaque; the widget only reads the string stored under
/// the configured suggestion attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(JsonValue);

impl Candidate {
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Builds a `{ attribute: label }` record.
    pub fn labeled(attribute: &str, label: impl Into<String>) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(attribute.to_string(), JsonValue::String(label.into()));
        Self(JsonValue::Object(map))
    }

    pub fn label<'a>(&'a self, attribute: &str) -> Option<&'a str> {
        self.0.get(attribute).and_then(JsonValue::as_str)
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
}

impl From<JsonValue> for Candidate {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The externally supplied starting value of the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    Text(String),
    Record(Candidate),
}

impl InitialValue {
    pub fn text(&self, attribute: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Record(record) => record.label(attribute).unwrap_or_default().to_string(),
        }
    }
}

impl Default for InitialValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for InitialValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for InitialValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Candidate> for InitialValue {
    fn from(value: Candidate) -> Self {
        Self::Record(value)
    }
}
