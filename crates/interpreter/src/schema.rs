//! Validation schema assembly
//!
//! The second field-tree traversal: collects each field's validation
//! descriptors into a schema keyed by field name, compiling regex patterns
//! once. A group with its own validation is treated as a single composite
//! value - its child validators are not collected (explicit override
//! semantics).
//!
//! The schema validates at submission time only: per-field constraints
//! first, then cross-field validators against the full snapshot. Failures
//! are structured data and never short-circuit other fields' evaluation.

use std::collections::BTreeMap;

use formbldr_domain::{
    ConfigError, CrossFieldValidation, FieldDefinition, FieldKind, FieldValidation,
    ValidationFailure, ValueSnapshot,
};
use regex::Regex;
use serde_json::Value;

use crate::rules::is_truthy;

/// Assembles the validation schema for a field tree.
pub fn build_validation_schema(
    fields: &[FieldDefinition],
    cross_field: &[CrossFieldValidation],
) -> Result<ValidationSchema, ConfigError> {
    let mut shape = BTreeMap::new();
    collect(fields, &mut shape)?;
    Ok(ValidationSchema {
        fields: shape,
        cross_field: cross_field.to_vec(),
    })
}

fn collect(
    fields: &[FieldDefinition],
    shape: &mut BTreeMap<String, CompiledValidation>,
) -> Result<(), ConfigError> {
    for field in fields {
        match (&field.validation, &field.kind) {
            // A group-level validator suppresses child validator
            // collection for that subtree
            (Some(validation), _) => {
                shape.insert(
                    field.name.clone(),
                    CompiledValidation::compile(&field.name, validation)?,
                );
            }
            (None, FieldKind::Group { fields }) => collect(fields, shape)?,
            (None, _) => {}
        }
    }
    Ok(())
}

/// One field's constraints with the pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledValidation {
    validation: FieldValidation,
    pattern: Option<(Regex, String)>,
}

impl CompiledValidation {
    fn compile(field: &str, validation: &FieldValidation) -> Result<Self, ConfigError> {
        let pattern = match &validation.pattern {
            Some(constraint) => {
                let regex = Regex::new(&constraint.value).map_err(|err| {
                    ConfigError::InvalidPattern {
                        field: field.to_string(),
                        pattern: constraint.value.clone(),
                        message: err.to_string(),
                    }
                })?;
                Some((regex, constraint.message.clone()))
            }
            None => None,
        };
        Ok(Self {
            validation: validation.clone(),
            pattern,
        })
    }

    /// The declared descriptors, for hosts that map the schema into their
    /// own form-state mechanism.
    pub fn descriptors(&self) -> &FieldValidation {
        &self.validation
    }

    /// Checks one field's value. Constraints other than `required` pass on
    /// absent or empty values.
    fn check(
        &self,
        name: &str,
        value: Option<&Value>,
        snapshot: &ValueSnapshot,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if let Some(message) = &self.validation.required {
            if !is_truthy(value) {
                failures.push(ValidationFailure::field(name, message.clone()));
            }
        }

        let value = match value {
            Some(Value::Null) | None => return failures,
            Some(value) => value,
        };

        if let Some(length) = value_length(value) {
            if let Some(constraint) = &self.validation.min_length {
                if length > 0 && length < constraint.value {
                    failures.push(ValidationFailure::field(name, constraint.message.clone()));
                }
            }
            if let Some(constraint) = &self.validation.max_length {
                if length > constraint.value {
                    failures.push(ValidationFailure::field(name, constraint.message.clone()));
                }
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(constraint) = &self.validation.min {
                if number < constraint.value {
                    failures.push(ValidationFailure::field(name, constraint.message.clone()));
                }
            }
            if let Some(constraint) = &self.validation.max {
                if number > constraint.value {
                    failures.push(ValidationFailure::field(name, constraint.message.clone()));
                }
            }
        }

        if let Some((regex, message)) = &self.pattern {
            if let Value::String(text) = value {
                if !text.is_empty() && !regex.is_match(text) {
                    failures.push(ValidationFailure::field(name, message.clone()));
                }
            }
        }

        for validator in &self.validation.custom {
            if let Some(message) = validator.check(value, snapshot) {
                failures.push(ValidationFailure::field(name, message));
            }
        }

        failures
    }
}

fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// The assembled schema: per-field compiled constraints plus schema-level
/// cross-field validators.
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    fields: BTreeMap<String, CompiledValidation>,
    cross_field: Vec<CrossFieldValidation>,
}

impl ValidationSchema {
    /// Names of all fields with declared validation.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&CompiledValidation> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.cross_field.is_empty()
    }

    /// Submission-time validation: every field's constraints, then every
    /// cross-field validator against the full snapshot. Never
    /// short-circuits; all failures are reported together.
    pub fn validate(&self, snapshot: &ValueSnapshot) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        for (name, compiled) in &self.fields {
            failures.extend(compiled.check(name, snapshot.get(name), snapshot));
        }

        for cross in &self.cross_field {
            if !(cross.validate)(snapshot) {
                failures.push(ValidationFailure::at(
                    cross.error_path.clone(),
                    cross.message.clone(),
                ));
            }
        }

        failures
    }
}
