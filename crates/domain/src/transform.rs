//! Declarative value transforms
//!
//! A transform maps between a field's stored value (what the form state
//! holds) and its display value (what the user sees and edits). Transforms
//! are a closed registry of named kinds so the field tree stays wire data;
//! both directions are pure and total - a value the transform does not
//! apply to passes through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A pure display <-> storage mapping attached to a field.
///
/// Presence of a transform forces a mediated binding: the hosting layer
/// must route reads through [`ValueTransform::to_display`] and writes
/// through [`ValueTransform::to_storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValueTransform {
    /// Stored string array, displayed as a comma-separated string
    CommaSeparatedList,
    /// Leading/trailing whitespace stripped on write-back
    Trimmed,
    /// Normalized to uppercase on display and write-back
    Uppercase,
    /// Normalized to lowercase on display and write-back
    Lowercase,
}

impl ValueTransform {
    /// Maps a stored value to its display form.
    pub fn to_display(&self, stored: &Value) -> Value {
        match self {
            ValueTransform::CommaSeparatedList => match stored {
                Value::Array(items) => {
                    let joined = items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    Value::String(joined)
                }
                other => other.clone(),
            },
            ValueTransform::Trimmed => stored.clone(),
            ValueTransform::Uppercase => map_string(stored, |s| s.to_uppercase()),
            ValueTransform::Lowercase => map_string(stored, |s| s.to_lowercase()),
        }
    }

    /// Maps a display value back to its stored form.
    pub fn to_storage(&self, display: &Value) -> Value {
        match self {
            ValueTransform::CommaSeparatedList => match display {
                Value::String(s) => {
                    let items = s
                        .split(',')
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .map(|part| Value::String(part.to_string()))
                        .collect();
                    Value::Array(items)
                }
                other => other.clone(),
            },
            ValueTransform::Trimmed => map_string(display, |s| s.trim().to_string()),
            ValueTransform::Uppercase => map_string(display, |s| s.to_uppercase()),
            ValueTransform::Lowercase => map_string(display, |s| s.to_lowercase()),
        }
    }
}

fn map_string(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}
