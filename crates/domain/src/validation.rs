//! Validation descriptors
//!
//! Field-level validation is declared as named constraint descriptors, each
//! carrying a human-readable failure message. Custom validators come from a
//! closed registry; each registry entry declares structurally whether it
//! needs the whole form's values or only its own field's value, which is
//! what drives binding strategy selection.
//!
//! Cross-field validations are schema-level only: they run against the full
//! value snapshot at submission time, never per-keystroke.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::snapshot::ValueSnapshot;

/// A constraint payload paired with its failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint<T> {
    pub value: T,
    pub message: String,
}

impl<T> Constraint<T> {
    pub fn new(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
        }
    }
}

/// Named validation constraints for one field.
///
/// All constraints except `required` pass on absent or empty values;
/// requiredness is its own constraint, as in the original form layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Failure message when the value is missing or empty
    #[serde(default)]
    pub required: Option<String>,
    /// Minimum length for strings (characters) and arrays (elements)
    #[serde(default)]
    pub min_length: Option<Constraint<usize>>,
    /// Maximum length for strings (characters) and arrays (elements)
    #[serde(default)]
    pub max_length: Option<Constraint<usize>>,
    /// Minimum numeric value
    #[serde(default)]
    pub min: Option<Constraint<f64>>,
    /// Maximum numeric value
    #[serde(default)]
    pub max: Option<Constraint<f64>>,
    /// Regex the string value must match. Compiled once when the
    /// validation schema is built; an invalid pattern is a fatal
    /// configuration error at mount.
    #[serde(default)]
    pub pattern: Option<Constraint<String>>,
    /// Custom validators from the closed registry
    #[serde(default)]
    pub custom: Vec<CustomValidator>,
}

impl FieldValidation {
    /// Required with a message; the common case.
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
            ..Self::default()
        }
    }

    /// True when any custom validator needs the whole form's values.
    pub fn needs_full_form_context(&self) -> bool {
        self.custom
            .iter()
            .any(CustomValidator::needs_full_form_context)
    }
}

/// Registry of custom validators.
///
/// The original form layer decided controlled-vs-uncontrolled binding by
/// inspecting a validator function's declared parameter count. That
/// convention is replaced here by a structural property of the registry:
/// [`CustomValidator::needs_full_form_context`] is true exactly for the
/// entries whose check reads other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CustomValidator {
    /// Date must be strictly in the future. Empty values pass.
    FutureOnly {
        #[serde(default)]
        message: Option<String>,
    },
    /// Date must be strictly in the past. Empty values pass.
    PastOnly {
        #[serde(default)]
        message: Option<String>,
    },
    /// Value must equal another field's current value (e.g. confirm
    /// fields). Needs the full form snapshot.
    MatchesField {
        field: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl CustomValidator {
    /// True when this validator inspects more than its own field's value.
    pub fn needs_full_form_context(&self) -> bool {
        matches!(self, CustomValidator::MatchesField { .. })
    }

    /// Runs the validator against a field's current value. Returns the
    /// failure message on failure, `None` on success. Total: malformed
    /// values fail validation, they never error.
    pub fn check(&self, value: &Value, snapshot: &ValueSnapshot) -> Option<String> {
        match self {
            CustomValidator::FutureOnly { message } => {
                check_date(value, message, "Date must be in the future", |date| {
                    date.is_future()
                })
            }
            CustomValidator::PastOnly { message } => {
                check_date(value, message, "Date must be in the past", |date| {
                    date.is_past()
                })
            }
            CustomValidator::MatchesField { field, message } => {
                let other = snapshot.get(field).unwrap_or(&Value::Null);
                if value == other {
                    None
                } else {
                    Some(message.clone().unwrap_or_else(|| {
                        format!("Must match the value of '{field}'")
                    }))
                }
            }
        }
    }
}

/// A date or datetime parsed from a field value.
enum ParsedDate {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl ParsedDate {
    fn is_future(&self) -> bool {
        match self {
            ParsedDate::DateTime(dt) => *dt > Utc::now(),
            ParsedDate::Date(date) => *date > Utc::now().date_naive(),
        }
    }

    fn is_past(&self) -> bool {
        match self {
            ParsedDate::DateTime(dt) => *dt < Utc::now(),
            ParsedDate::Date(date) => *date < Utc::now().date_naive(),
        }
    }
}

fn check_date(
    value: &Value,
    message: &Option<String>,
    default_message: &str,
    accept: impl Fn(&ParsedDate) -> bool,
) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => s,
        _ => return Some("Invalid date".to_string()),
    };

    let parsed = DateTime::parse_from_rfc3339(text)
        .map(|dt| ParsedDate::DateTime(dt.with_timezone(&Utc)))
        .or_else(|_| text.parse::<NaiveDate>().map(ParsedDate::Date));

    match parsed {
        Ok(date) if accept(&date) => None,
        Ok(_) => Some(
            message
                .clone()
                .unwrap_or_else(|| default_message.to_string()),
        ),
        Err(_) => Some("Invalid date".to_string()),
    }
}

/// Predicate a cross-field validation runs against the full snapshot.
pub type CrossFieldPredicate = Arc<dyn Fn(&ValueSnapshot) -> bool + Send + Sync>;

/// A validator evaluated against the whole value snapshot at submission
/// time. On failure its message is attached at `error_path`.
#[derive(Clone)]
pub struct CrossFieldValidation {
    /// Fields this validation reads, for documentation and host tooling
    pub fields: Vec<String>,
    /// The predicate; `true` means valid
    pub validate: CrossFieldPredicate,
    /// Failure message
    pub message: String,
    /// Where the failure is attached in the schema output
    pub error_path: Vec<String>,
}

impl CrossFieldValidation {
    pub fn new(
        fields: Vec<String>,
        validate: impl Fn(&ValueSnapshot) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
        error_path: Vec<String>,
    ) -> Self {
        Self {
            fields,
            validate: Arc::new(validate),
            message: message.into(),
            error_path,
        }
    }
}

impl fmt::Debug for CrossFieldValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldValidation")
            .field("fields", &self.fields)
            .field("message", &self.message)
            .field("error_path", &self.error_path)
            .finish_non_exhaustive()
    }
}

/// A single validation failure: a normal user-facing outcome, reported as
/// structured data so the presentation layer can render it inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Path to the failing field (a single segment for field-level
    /// failures, the declared error path for cross-field failures)
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationFailure {
    /// Field-level failure on a single named field.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: vec![name.into()],
            message: message.into(),
        }
    }

    /// Failure attached at an arbitrary path.
    pub fn at(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}
